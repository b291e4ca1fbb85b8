//! Expected frequencies under the null hypothesis.
//!
//! One function per family. Continuous families integrate the CDF over each
//! bin, `n * (F(b) - F(a))`; the Poisson family evaluates the PMF at each
//! integer bin, `n * P(X = k)`. The uniform family needs no CDF: every bin
//! of a binning over [a, b] carries `n / bins`.
//!
//! Continuous bins derived from a sample's own extent do not reach the
//! tails of the distribution. The outermost bins absorb them: the first bin
//! starts at `F = 0` and the last ends at `F = 1`, so the expected total is
//! `n`. Poisson values outside the observed range stay uncounted.

use crate::binning::BinningSpec;
use crate::error::{Result, VariateError};
use crate::numeric::{exponential_cdf, normal_cdf, poisson_pmf};
use crate::params::{
    validate_bin_count, validate_normal, validate_poisson, validate_rate, validate_sample_size,
    validate_uniform,
};

/// Flat expected frequencies for a uniform sample binned over [a, b].
///
/// # Examples
/// ```
/// use variate_core::expected::expected_uniform_frequencies;
///
/// let e = expected_uniform_frequencies(0.0, 10.0, 100, 5).unwrap();
/// assert_eq!(e, vec![20.0; 5]);
/// ```
pub fn expected_uniform_frequencies(a: f64, b: f64, n: usize, bins: usize) -> Result<Vec<f64>> {
    validate_uniform(a, b)?;
    validate_sample_size(n)?;
    validate_bin_count(bins)?;
    Ok(vec![n as f64 / bins as f64; bins])
}

/// Expected frequencies for a normal sample over continuous bins.
pub fn expected_normal_frequencies(
    mu: f64,
    sigma: f64,
    n: usize,
    binning: &BinningSpec,
) -> Result<Vec<f64>> {
    validate_normal(mu, sigma)?;
    validate_sample_size(n)?;
    continuous_expected(n, binning, |x| normal_cdf(x, mu, sigma))
}

/// Expected frequencies for an exponential sample over continuous bins.
pub fn expected_exponential_frequencies(
    lambda: f64,
    n: usize,
    binning: &BinningSpec,
) -> Result<Vec<f64>> {
    validate_rate("lambda", lambda)?;
    validate_sample_size(n)?;
    continuous_expected(n, binning, |x| exponential_cdf(x, lambda))
}

/// Expected frequencies for a Poisson sample over integer bins
/// `lower ..= lower + bin_count - 1`.
///
/// # Examples
/// ```
/// use variate_core::expected::expected_poisson_frequencies;
///
/// let e = expected_poisson_frequencies(1.0, 1000, 0, 2).unwrap();
/// // P(X=0) = P(X=1) = e^-1
/// assert!((e[0] - 367.879).abs() < 1e-3);
/// assert!((e[1] - e[0]).abs() < 1e-9);
/// ```
pub fn expected_poisson_frequencies(
    lambda: f64,
    n: usize,
    lower: u64,
    bin_count: usize,
) -> Result<Vec<f64>> {
    validate_poisson(lambda)?;
    validate_sample_size(n)?;
    validate_bin_count(bin_count)?;
    (0..bin_count as u64)
        .map(|offset| Ok(n as f64 * poisson_pmf(lower + offset, lambda)?))
        .collect()
}

fn continuous_expected<F>(n: usize, binning: &BinningSpec, cdf: F) -> Result<Vec<f64>>
where
    F: Fn(f64) -> Result<f64>,
{
    let bin_count = match *binning {
        BinningSpec::Continuous { bin_count, .. } => bin_count,
        BinningSpec::Discrete { lower, bin_count } => {
            return Err(VariateError::BinningMismatch {
                value: lower as f64,
                lower: lower as f64,
                upper: (lower + bin_count as u64 - 1) as f64,
            })
        }
    };

    let mut expected = Vec::with_capacity(bin_count);
    // The first bin starts at F = 0
    let mut previous = 0.0;
    for index in 0..bin_count {
        let (_, b) = binning
            .bin_bounds(index)
            .ok_or(VariateError::LengthMismatch {
                observed: index,
                expected: bin_count,
            })?;
        // The last bin ends at F = 1; adjacent bins share an edge CDF value
        let upper_cdf = if index + 1 == bin_count { 1.0 } else { cdf(b)? };
        expected.push(n as f64 * (upper_cdf - previous).max(0.0));
        previous = upper_cdf;
    }
    Ok(expected)
}
