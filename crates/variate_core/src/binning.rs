//! Histogram binning.
//!
//! Two binning schemes with genuinely different semantics:
//!
//! - [`BinningSpec::Continuous`]: `bin_count` equal-width half-open intervals
//!   over `[lower, upper]`; the upper bound itself belongs to the last bin.
//! - [`BinningSpec::Discrete`]: one bin per integer value starting at `lower`.
//!
//! Values outside the declared range are reported as
//! [`VariateError::BinningMismatch`], never dropped or wrapped.

use crate::error::{Result, VariateError};
use crate::params::validate_bin_count;
use crate::sample::Sample;

/// Bin layout for a frequency table.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "scheme", rename_all = "lowercase"))]
pub enum BinningSpec {
    /// Equal-width intervals over a real range.
    Continuous {
        /// Number of intervals
        bin_count: usize,
        /// Inclusive lower bound
        lower: f64,
        /// Upper bound, inclusive for the last bin
        upper: f64,
    },
    /// One bin per integer `lower, lower + 1, ..., lower + bin_count - 1`.
    Discrete {
        /// Value of the first bin
        lower: u64,
        /// Number of integer bins
        bin_count: usize,
    },
}

impl BinningSpec {
    /// Checked continuous constructor.
    ///
    /// # Examples
    /// ```
    /// use variate_core::binning::BinningSpec;
    ///
    /// let spec = BinningSpec::continuous(4, 0.0, 2.0).unwrap();
    /// assert_eq!(spec.width(), Some(0.5));
    /// assert!(BinningSpec::continuous(4, 2.0, 2.0).is_err());
    /// ```
    pub fn continuous(bin_count: usize, lower: f64, upper: f64) -> Result<Self> {
        validate_bin_count(bin_count)?;
        if !lower.is_finite() {
            return Err(VariateError::invalid_parameter(
                "lower",
                lower,
                "must be finite",
            ));
        }
        if !upper.is_finite() || upper <= lower {
            return Err(VariateError::invalid_parameter(
                "upper",
                upper,
                "must be finite and greater than lower",
            ));
        }
        Ok(Self::Continuous {
            bin_count,
            lower,
            upper,
        })
    }

    /// Checked discrete constructor.
    pub fn discrete(lower: u64, bin_count: usize) -> Result<Self> {
        validate_bin_count(bin_count)?;
        Ok(Self::Discrete { lower, bin_count })
    }

    /// Derives a binning that covers the sample's own range.
    ///
    /// Continuous samples get `bin_count` intervals over `[min, max]`. A
    /// sample whose values are all equal gets a single narrow bin around
    /// that value.
    /// Discrete samples get one bin per integer in `[min, max]`; the
    /// requested `bin_count` does not apply to them.
    pub fn for_sample(sample: &Sample, bin_count: usize) -> Result<Self> {
        match sample {
            Sample::Continuous(values) => {
                let (min, max) = continuous_extent(values)?;
                if min == max {
                    // One bin around the point; expected counts fold the tails into it
                    let pad = min.abs().max(1.0) * 4.0 * f64::EPSILON;
                    return Self::continuous(
                        1,
                        (min - pad).max(f64::MIN),
                        (max + pad).min(f64::MAX),
                    );
                }
                Self::continuous(bin_count, min, max)
            }
            Sample::Discrete(values) => {
                let min = values.iter().min().copied();
                let max = values.iter().max().copied();
                match (min, max) {
                    (Some(min), Some(max)) => Self::discrete(min, (max - min) as usize + 1),
                    _ => Err(VariateError::invalid_parameter(
                        "n",
                        0.0,
                        "must be at least 1",
                    )),
                }
            }
        }
    }

    /// Number of bins.
    pub fn bin_count(&self) -> usize {
        match *self {
            Self::Continuous { bin_count, .. } | Self::Discrete { bin_count, .. } => bin_count,
        }
    }

    /// True for integer bins.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Discrete { .. })
    }

    /// Interval width; `None` for discrete bins.
    pub fn width(&self) -> Option<f64> {
        match *self {
            Self::Continuous {
                bin_count,
                lower,
                upper,
            } => Some((upper - lower) / bin_count as f64),
            Self::Discrete { .. } => None,
        }
    }

    /// Edges `(a, b)` of continuous bin `index`.
    ///
    /// The last bin's upper edge is exactly `upper`, not `lower + k * width`,
    /// so accumulated rounding never leaves a sliver uncovered.
    pub fn bin_bounds(&self, index: usize) -> Option<(f64, f64)> {
        match *self {
            Self::Continuous {
                bin_count,
                lower,
                upper,
            } if index < bin_count => {
                let width = (upper - lower) / bin_count as f64;
                let a = lower + index as f64 * width;
                let b = if index + 1 == bin_count {
                    upper
                } else {
                    lower + (index + 1) as f64 * width
                };
                Some((a, b))
            }
            _ => None,
        }
    }

    /// Integer value of discrete bin `index`.
    pub fn bin_value(&self, index: usize) -> Option<u64> {
        match *self {
            Self::Discrete { lower, bin_count } if index < bin_count => {
                Some(lower + index as u64)
            }
            _ => None,
        }
    }

    /// Display label for bin `index`.
    ///
    /// Continuous bins render as `[a, b)`, the last as `[a, b]`; discrete bins
    /// render as their integer value.
    ///
    /// # Examples
    /// ```
    /// use variate_core::binning::BinningSpec;
    ///
    /// let spec = BinningSpec::continuous(2, 0.0, 1.0).unwrap();
    /// assert_eq!(spec.label(0, 2), "[0.00, 0.50)");
    /// assert_eq!(spec.label(1, 2), "[0.50, 1.00]");
    ///
    /// let spec = BinningSpec::discrete(3, 2).unwrap();
    /// assert_eq!(spec.label(1, 2), "4");
    /// ```
    pub fn label(&self, index: usize, precision: usize) -> String {
        match self {
            Self::Continuous { bin_count, .. } => match self.bin_bounds(index) {
                Some((a, b)) => {
                    let close = if index + 1 == *bin_count { ']' } else { ')' };
                    format!("[{:.*}, {:.*}{}", precision, a, precision, b, close)
                }
                None => String::new(),
            },
            Self::Discrete { .. } => self
                .bin_value(index)
                .map(|k| k.to_string())
                .unwrap_or_default(),
        }
    }

    /// Counts a sample into this binning.
    pub fn histogram(&self, sample: &Sample) -> Result<Vec<u64>> {
        match (*self, sample) {
            (
                Self::Continuous {
                    bin_count,
                    lower,
                    upper,
                },
                Sample::Continuous(values),
            ) => build_histogram(values, bin_count, lower, upper),
            (Self::Discrete { lower, bin_count }, Sample::Discrete(values)) => {
                build_discrete_histogram(values, lower, bin_count)
            }
            (Self::Continuous { lower, upper, .. }, Sample::Discrete(values)) => {
                Err(VariateError::BinningMismatch {
                    value: values.first().map(|&k| k as f64).unwrap_or(f64::NAN),
                    lower,
                    upper,
                })
            }
            (Self::Discrete { lower, bin_count }, Sample::Continuous(values)) => {
                Err(VariateError::BinningMismatch {
                    value: values.first().copied().unwrap_or(f64::NAN),
                    lower: lower as f64,
                    upper: (lower + bin_count as u64 - 1) as f64,
                })
            }
        }
    }
}

fn continuous_extent(values: &[f64]) -> Result<(f64, f64)> {
    let mut iter = values.iter().copied();
    let first = iter.next().ok_or_else(|| {
        VariateError::invalid_parameter("n", 0.0, "must be at least 1")
    })?;
    Ok(iter.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
}

/// Counts `values` into `bin_count` equal-width bins over `[lower, upper]`.
///
/// Bin `i` holds values in `[lower + i w, lower + (i + 1) w)` with
/// `w = (upper - lower) / bin_count`. A value equal to `upper` is placed in
/// the last bin. Values below `lower`, above `upper`, or NaN are a
/// [`VariateError::BinningMismatch`].
///
/// # Examples
/// ```
/// use variate_core::binning::build_histogram;
///
/// let counts = build_histogram(&[0.0, 0.4, 0.5, 1.0], 2, 0.0, 1.0).unwrap();
/// assert_eq!(counts, vec![2, 2]);
/// ```
pub fn build_histogram(
    values: &[f64],
    bin_count: usize,
    lower: f64,
    upper: f64,
) -> Result<Vec<u64>> {
    let spec = BinningSpec::continuous(bin_count, lower, upper)?;
    let width = spec.width().unwrap_or(upper - lower);

    let mut counts = vec![0u64; bin_count];
    for &value in values {
        // Negated comparison so NaN is rejected too
        if !(value >= lower && value <= upper) {
            return Err(VariateError::BinningMismatch {
                value,
                lower,
                upper,
            });
        }
        let index = ((value - lower) / width) as usize;
        counts[index.min(bin_count - 1)] += 1;
    }
    Ok(counts)
}

/// Counts integer `values` into one bin per value from `lower` to
/// `lower + bin_count - 1`.
pub fn build_discrete_histogram(values: &[u64], lower: u64, bin_count: usize) -> Result<Vec<u64>> {
    validate_bin_count(bin_count)?;
    let upper = lower + bin_count as u64 - 1;

    let mut counts = vec![0u64; bin_count];
    for &value in values {
        if value < lower || value > upper {
            return Err(VariateError::BinningMismatch {
                value: value as f64,
                lower: lower as f64,
                upper: upper as f64,
            });
        }
        counts[(value - lower) as usize] += 1;
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_upper_bound_folds_into_last_bin() {
        let counts = build_histogram(&[10.0], 5, 0.0, 10.0).unwrap();
        assert_eq!(counts, vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_inner_edge_opens_next_bin() {
        let counts = build_histogram(&[2.0, 1.999], 5, 0.0, 10.0).unwrap();
        assert_eq!(counts, vec![1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_rounding_overflow_clamped() {
        // 0.3 / (0.3 / 3) lands on or just past index 3
        let counts = build_histogram(&[0.3], 3, 0.0, 0.3).unwrap();
        assert_eq!(counts, vec![0, 0, 1]);
    }

    #[test]
    fn test_out_of_range_is_mismatch() {
        for bad in [-0.1, 10.5, f64::NAN] {
            let err = build_histogram(&[1.0, bad], 5, 0.0, 10.0).unwrap_err();
            assert!(matches!(err, VariateError::BinningMismatch { .. }));
        }
    }

    #[test]
    fn test_invalid_layout_rejected() {
        assert!(build_histogram(&[], 0, 0.0, 1.0).is_err());
        assert!(build_histogram(&[], 3, 1.0, 1.0).is_err());
        assert!(build_histogram(&[], 3, 0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_counts_sum_to_sample_size() {
        let values: Vec<f64> = (0..=100).map(|i| i as f64 * 0.37).collect();
        let counts = build_histogram(&values, 7, 0.0, 40.0).unwrap();
        assert_eq!(counts.iter().sum::<u64>(), values.len() as u64);
    }

    #[test]
    fn test_discrete_histogram() {
        let counts = build_discrete_histogram(&[2, 3, 3, 5], 2, 4).unwrap();
        assert_eq!(counts, vec![1, 2, 0, 1]);
        assert!(build_discrete_histogram(&[6], 2, 4).is_err());
        assert!(build_discrete_histogram(&[1], 2, 4).is_err());
    }

    #[test]
    fn test_for_sample_continuous_uses_extent() {
        let sample = Sample::Continuous(vec![3.0, -1.0, 2.0]);
        let spec = BinningSpec::for_sample(&sample, 4).unwrap();
        assert_eq!(
            spec,
            BinningSpec::Continuous {
                bin_count: 4,
                lower: -1.0,
                upper: 3.0
            }
        );
        assert_eq!(spec.histogram(&sample).unwrap(), vec![1, 0, 0, 2]);
    }

    #[test]
    fn test_for_sample_constant_gets_single_bin() {
        let sample = Sample::Continuous(vec![4.0, 4.0]);
        let spec = BinningSpec::for_sample(&sample, 3).unwrap();
        assert_eq!(spec.bin_count(), 1);
        let (lo, hi) = spec.bin_bounds(0).unwrap();
        assert!(lo < 4.0 && 4.0 < hi);
        assert_eq!(spec.histogram(&sample).unwrap(), vec![2]);
    }

    #[test]
    fn test_for_sample_constant_at_extremes() {
        for value in [0.0, -3.5e-300, f64::MAX, f64::MIN] {
            let sample = Sample::Continuous(vec![value]);
            let spec = BinningSpec::for_sample(&sample, 1).unwrap();
            assert_eq!(spec.histogram(&sample).unwrap(), vec![1], "{}", value);
        }
    }

    #[test]
    fn test_for_sample_discrete_one_bin_per_value() {
        let sample = Sample::Discrete(vec![4, 1, 2, 4]);
        let spec = BinningSpec::for_sample(&sample, 99).unwrap();
        assert_eq!(
            spec,
            BinningSpec::Discrete {
                lower: 1,
                bin_count: 4
            }
        );
        assert_eq!(spec.histogram(&sample).unwrap(), vec![1, 1, 0, 2]);
    }

    #[test]
    fn test_for_sample_single_discrete_value() {
        let sample = Sample::Discrete(vec![3, 3, 3]);
        let spec = BinningSpec::for_sample(&sample, 5).unwrap();
        assert_eq!(spec.bin_count(), 1);
        assert_eq!(spec.histogram(&sample).unwrap(), vec![3]);
    }

    #[test]
    fn test_scheme_and_sample_must_agree() {
        let continuous = BinningSpec::continuous(2, 0.0, 1.0).unwrap();
        assert!(continuous.histogram(&Sample::Discrete(vec![0])).is_err());
        let discrete = BinningSpec::discrete(0, 2).unwrap();
        assert!(discrete.histogram(&Sample::Continuous(vec![0.0])).is_err());
    }

    #[test]
    fn test_bin_bounds_cover_range() {
        let spec = BinningSpec::continuous(3, 0.0, 0.3).unwrap();
        let (a0, _) = spec.bin_bounds(0).unwrap();
        let (a1, b1) = spec.bin_bounds(1).unwrap();
        let (_, b2) = spec.bin_bounds(2).unwrap();
        assert_eq!(a0, 0.0);
        assert_eq!(b2, 0.3);
        assert_relative_eq!(b1 - a1, 0.1, epsilon = 1e-12);
        assert!(spec.bin_bounds(3).is_none());
    }

    #[test]
    fn test_labels() {
        let spec = BinningSpec::continuous(2, -1.0, 1.0).unwrap();
        assert_eq!(spec.label(0, 1), "[-1.0, 0.0)");
        assert_eq!(spec.label(1, 1), "[0.0, 1.0]");
        assert_eq!(spec.label(2, 1), "");

        let spec = BinningSpec::discrete(0, 3).unwrap();
        assert_eq!(spec.label(0, 4), "0");
        assert_eq!(spec.label(2, 4), "2");
    }
}
