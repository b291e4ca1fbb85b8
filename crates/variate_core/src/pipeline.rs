//! One goodness-of-fit cycle: generate, bin, compare.
//!
//! [`run_cycle`] is the entry point the interactive shell calls once per
//! iteration. All inputs are validated before the first random draw, so an
//! invalid request consumes no randomness and produces no partial sample.

use crate::binning::BinningSpec;
use crate::chi_square::ChiSquareResult;
use crate::error::{Result, VariateError};
use crate::model::VariateModel;
use crate::params::{validate_bin_count, validate_sample_size, DistributionKind, DistributionParameters};
use crate::rng::RandomSource;

/// Default number of continuous bins for a sample of size `n`: `ceil(sqrt(n))`.
///
/// # Examples
/// ```
/// use variate_core::pipeline::default_bin_count;
///
/// assert_eq!(default_bin_count(100), 10);
/// assert_eq!(default_bin_count(101), 11);
/// assert_eq!(default_bin_count(1), 1);
/// ```
pub fn default_bin_count(n: usize) -> usize {
    let mut root = (n as f64).sqrt().ceil() as usize;
    // f64 sqrt can be off by one ulp for large n; an overflowing square is >= n
    let square_below = |r: usize| r.checked_mul(r).map_or(false, |sq| sq < n);
    while square_below(root) {
        root += 1;
    }
    while root > 1 && !square_below(root - 1) {
        root -= 1;
    }
    root.max(1)
}

/// One presentation row: bin label with observed and expected counts.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyRow {
    /// `[a, b)` for continuous bins, the integer value for discrete bins
    pub label: String,
    /// Observed count
    pub observed: u64,
    /// Expected count under the null hypothesis
    pub expected: f64,
}

/// Observed and expected frequencies over a common binning.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyTable {
    binning: BinningSpec,
    observed: Vec<u64>,
    expected: Vec<f64>,
}

impl FrequencyTable {
    /// Creates a table; both sequences must have one entry per bin.
    pub fn new(binning: BinningSpec, observed: Vec<u64>, expected: Vec<f64>) -> Result<Self> {
        if observed.len() != binning.bin_count() || expected.len() != binning.bin_count() {
            return Err(VariateError::LengthMismatch {
                observed: observed.len(),
                expected: expected.len(),
            });
        }
        Ok(Self {
            binning,
            observed,
            expected,
        })
    }

    /// Bin layout.
    pub fn binning(&self) -> &BinningSpec {
        &self.binning
    }

    /// Observed counts per bin.
    pub fn observed(&self) -> &[u64] {
        &self.observed
    }

    /// Expected counts per bin.
    pub fn expected(&self) -> &[f64] {
        &self.expected
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.observed.len()
    }

    /// True when the table has no bins.
    pub fn is_empty(&self) -> bool {
        self.observed.is_empty()
    }

    /// Sum of observed counts; equals the sample size.
    pub fn observed_total(&self) -> u64 {
        self.observed.iter().sum()
    }

    /// Sum of expected counts.
    pub fn expected_total(&self) -> f64 {
        self.expected.iter().sum()
    }

    /// Labelled rows for presentation, with continuous edges rounded to
    /// `precision` decimals.
    pub fn rows(&self, precision: usize) -> Vec<FrequencyRow> {
        self.observed
            .iter()
            .zip(&self.expected)
            .enumerate()
            .map(|(index, (&observed, &expected))| FrequencyRow {
                label: self.binning.label(index, precision),
                observed,
                expected,
            })
            .collect()
    }
}

/// Result of one cycle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CycleOutcome {
    /// Parameters the sample was drawn from
    pub distribution: DistributionParameters,
    /// Number of variates drawn
    pub sample_size: usize,
    /// Observed and expected frequencies
    pub table: FrequencyTable,
    /// Goodness-of-fit statistic
    pub chi_square: ChiSquareResult,
}

impl CycleOutcome {
    /// Family of the tested distribution.
    pub fn kind(&self) -> DistributionKind {
        self.distribution.kind()
    }
}

/// Runs one cycle: validate, generate `n` variates, bin them, compute the
/// expected frequencies and the chi-square statistic.
///
/// `bin_count` defaults to [`default_bin_count`]. Poisson samples always use
/// one bin per observed integer value.
///
/// # Examples
/// ```
/// use variate_core::params::DistributionParameters;
/// use variate_core::pipeline::run_cycle;
/// use variate_core::rng::SeededSource;
///
/// let params = DistributionParameters::uniform(0.0, 10.0).unwrap();
/// let mut rng = SeededSource::from_seed(42);
/// let outcome = run_cycle(&params, 1000, Some(10), &mut rng).unwrap();
/// assert_eq!(outcome.table.observed_total(), 1000);
/// assert_eq!(outcome.chi_square.degrees_of_freedom, 9);
/// ```
pub fn run_cycle<R: RandomSource + ?Sized>(
    params: &DistributionParameters,
    n: usize,
    bin_count: Option<usize>,
    source: &mut R,
) -> Result<CycleOutcome> {
    params.validate()?;
    validate_sample_size(n)?;
    let bin_count = bin_count.unwrap_or_else(|| default_bin_count(n));
    validate_bin_count(bin_count)?;

    let sample = params.generate(n, source)?;
    let binning = params.binning_for(&sample, bin_count)?;
    let observed = binning.histogram(&sample)?;
    let expected = params.expected_frequencies(n, &binning)?;
    let chi_square = ChiSquareResult::evaluate(&observed, &expected)?;
    let table = FrequencyTable::new(binning, observed, expected)?;

    Ok(CycleOutcome {
        distribution: *params,
        sample_size: n,
        table,
        chi_square,
    })
}
