//! Error types for structured error handling.
//!
//! This module provides [`VariateError`], the single error type returned by
//! every fallible operation in the crate:
//! - `InvalidParameter`: rejected distribution parameters, sample size or bin count
//! - `BinningMismatch`: a sample value outside the declared histogram range
//! - `LengthMismatch`: observed and expected sequences of different length
//!
//! Boundary draws of exactly 0 or 1 inside the logarithmic transforms are not
//! errors; they are absorbed by [`crate::rng::draw_open_unit`].

use thiserror::Error;

/// Categorised errors for sampling, binning and goodness-of-fit evaluation.
///
/// # Examples
/// ```
/// use variate_core::VariateError;
///
/// let err = VariateError::invalid_parameter("sigma", -1.0, "must be positive");
/// assert_eq!(format!("{}", err), "Invalid parameter sigma = -1: must be positive");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VariateError {
    /// A parameter violates its invariant (b > a, sigma > 0, lambda > 0, n >= 1, bins >= 1).
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the distribution definition
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Violated constraint
        reason: &'static str,
    },

    /// A sample value falls outside the histogram range.
    #[error("Binning mismatch: value {value} outside [{lower}, {upper}]")]
    BinningMismatch {
        /// The offending sample value
        value: f64,
        /// Lower bound of the histogram
        lower: f64,
        /// Upper bound of the histogram
        upper: f64,
    },

    /// Observed and expected frequency sequences differ in length.
    #[error("Length mismatch: {observed} observed bins vs {expected} expected bins")]
    LengthMismatch {
        /// Number of observed bins
        observed: usize,
        /// Number of expected bins
        expected: usize,
    },
}

impl VariateError {
    /// Create an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }

    /// True for errors caused by caller input rather than by the data.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VariateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binning_mismatch_display() {
        let err = VariateError::BinningMismatch {
            value: 11.0,
            lower: 0.0,
            upper: 10.0,
        };
        assert_eq!(
            format!("{}", err),
            "Binning mismatch: value 11 outside [0, 10]"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = VariateError::LengthMismatch {
            observed: 3,
            expected: 4,
        };
        assert!(format!("{}", err).contains("3 observed bins vs 4 expected"));
    }

    #[test]
    fn test_is_input_error() {
        assert!(VariateError::invalid_parameter("n", 0.0, "must be at least 1").is_input_error());
        assert!(!VariateError::BinningMismatch {
            value: 2.0,
            lower: 0.0,
            upper: 1.0
        }
        .is_input_error());
    }
}
