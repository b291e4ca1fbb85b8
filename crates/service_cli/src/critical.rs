//! Suggested critical values for the chi-square decision.
//!
//! The evaluator never computes its own threshold; the shell only offers
//! the `(1 - alpha)` quantile of the chi-square distribution as a default.

use statrs::distribution::{ChiSquared, ContinuousCDF};

/// `(1 - alpha)` quantile of chi-square with `degrees_of_freedom`.
///
/// Returns `None` for zero degrees of freedom (a single bin), where no
/// chi-square distribution exists, or for alpha outside (0, 1).
pub fn suggest_critical_value(degrees_of_freedom: usize, alpha: f64) -> Option<f64> {
    if degrees_of_freedom == 0 || !(alpha > 0.0 && alpha < 1.0) {
        return None;
    }
    let dist = ChiSquared::new(degrees_of_freedom as f64).ok()?;
    let quantile = dist.inverse_cdf(1.0 - alpha);
    quantile.is_finite().then_some(quantile)
}
