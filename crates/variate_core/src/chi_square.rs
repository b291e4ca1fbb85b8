//! Chi-square goodness-of-fit evaluation.
//!
//! The statistic is `sum((o - e)^2 / e)` over bins with `e > 0`. Bins whose
//! expected count is zero contribute nothing and are counted in
//! [`ChiSquareResult::skipped_bins`]. Strict theory would reject or merge
//! such bins; skipping them can bias the statistic when many bins are empty.
//!
//! The critical value is an input. This module never looks one up.

use std::fmt;

use crate::error::{Result, VariateError};

/// Outcome of comparing the statistic with a critical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Verdict {
    /// statistic <= critical value: the sample is consistent with the distribution
    FailToReject,
    /// statistic > critical value: the sample does not follow the distribution
    Reject,
}

impl Verdict {
    /// True when the null hypothesis is rejected.
    pub fn is_reject(&self) -> bool {
        matches!(self, Verdict::Reject)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::FailToReject => f.write_str("fail to reject H0"),
            Verdict::Reject => f.write_str("reject H0"),
        }
    }
}

/// Chi-square statistic with its degrees of freedom.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChiSquareResult {
    /// Sum of `(o - e)^2 / e` over bins with positive expectation
    pub statistic: f64,
    /// Number of bins minus one
    pub degrees_of_freedom: usize,
    /// Bins skipped because their expected count was not positive
    pub skipped_bins: usize,
}

impl ChiSquareResult {
    /// Evaluates observed against expected frequencies.
    ///
    /// # Examples
    /// ```
    /// use variate_core::chi_square::ChiSquareResult;
    ///
    /// let r = ChiSquareResult::evaluate(&[8, 12, 10], &[10.0, 10.0, 10.0]).unwrap();
    /// assert!((r.statistic - 0.8).abs() < 1e-12);
    /// assert_eq!(r.degrees_of_freedom, 2);
    /// ```
    pub fn evaluate(observed: &[u64], expected: &[f64]) -> Result<Self> {
        check_lengths(observed, expected)?;
        let skipped_bins = expected.iter().filter(|&&e| !contributes(e)).count();
        Ok(Self {
            statistic: accumulate(observed, expected),
            degrees_of_freedom: observed.len().saturating_sub(1),
            skipped_bins,
        })
    }

    /// Compares the statistic with an externally supplied critical value.
    pub fn verdict(&self, critical_value: f64) -> Result<Verdict> {
        if !critical_value.is_finite() || critical_value < 0.0 {
            return Err(VariateError::invalid_parameter(
                "critical_value",
                critical_value,
                "must be finite and non-negative",
            ));
        }
        if self.statistic <= critical_value {
            Ok(Verdict::FailToReject)
        } else {
            Ok(Verdict::Reject)
        }
    }
}

/// Chi-square statistic of observed against expected counts.
///
/// # Examples
/// ```
/// use variate_core::chi_square::chi_square_statistic;
///
/// assert_eq!(chi_square_statistic(&[10, 10, 10], &[10.0, 10.0, 10.0]).unwrap(), 0.0);
/// ```
pub fn chi_square_statistic(observed: &[u64], expected: &[f64]) -> Result<f64> {
    check_lengths(observed, expected)?;
    Ok(accumulate(observed, expected))
}

fn check_lengths(observed: &[u64], expected: &[f64]) -> Result<()> {
    if observed.len() != expected.len() {
        return Err(VariateError::LengthMismatch {
            observed: observed.len(),
            expected: expected.len(),
        });
    }
    Ok(())
}

/// Bins with zero, negative or NaN expectation are left out.
fn contributes(expected: f64) -> bool {
    expected > 0.0
}

fn accumulate(observed: &[u64], expected: &[f64]) -> f64 {
    observed
        .iter()
        .zip(expected)
        .filter(|&(_, &e)| contributes(e))
        .map(|(&o, &e)| {
            let diff = o as f64 - e;
            diff * diff / e
        })
        .sum()
}
