//! CDF and PMF evaluation backed by `statrs`.
//!
//! Expected frequencies are computed from these closed-form evaluations,
//! never by simulation. Each function is pure and deterministic; invalid
//! parameters surface as [`VariateError::InvalidParameter`].

use statrs::distribution::{ContinuousCDF, Discrete, Exp, Normal, Poisson};

use crate::error::{Result, VariateError};

/// P(X <= x) for X ~ N(mu, sigma^2).
///
/// # Examples
/// ```
/// use variate_core::numeric::normal_cdf;
///
/// assert!((normal_cdf(0.0, 0.0, 1.0).unwrap() - 0.5).abs() < 1e-12);
/// ```
pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    let dist = Normal::new(mu, sigma)
        .map_err(|_| VariateError::invalid_parameter("sigma", sigma, "must be positive"))?;
    Ok(dist.cdf(x))
}

/// P(X <= x) for X ~ Exp(lambda); zero for negative `x`.
pub fn exponential_cdf(x: f64, lambda: f64) -> Result<f64> {
    let dist = Exp::new(lambda)
        .map_err(|_| VariateError::invalid_parameter("lambda", lambda, "must be positive"))?;
    Ok(dist.cdf(x))
}

/// P(X = k) for X ~ Poisson(lambda).
pub fn poisson_pmf(k: u64, lambda: f64) -> Result<f64> {
    let dist = Poisson::new(lambda)
        .map_err(|_| VariateError::invalid_parameter("lambda", lambda, "must be positive"))?;
    Ok(dist.pmf(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normal_cdf_reference_values() {
        assert_relative_eq!(normal_cdf(1.0, 0.0, 1.0).unwrap(), 0.8413447460685429, epsilon = 1e-9);
        assert_relative_eq!(normal_cdf(-2.0, 0.0, 1.0).unwrap(), 0.022750131948179195, epsilon = 1e-9);
        // Standardisation: N(5, 2) at 7 is Phi(1)
        assert_relative_eq!(normal_cdf(7.0, 5.0, 2.0).unwrap(), 0.8413447460685429, epsilon = 1e-9);
    }

    #[test]
    fn test_normal_cdf_rejects_bad_sigma() {
        assert!(normal_cdf(0.0, 0.0, 0.0).is_err());
        assert!(normal_cdf(0.0, 0.0, -1.0).is_err());
    }

    #[test]
    fn test_exponential_cdf_closed_form() {
        for x in [0.0_f64, 0.1, 1.0, 3.5] {
            let expected = 1.0 - (-2.0 * x).exp();
            assert_relative_eq!(exponential_cdf(x, 2.0).unwrap(), expected, epsilon = 1e-12);
        }
        assert_eq!(exponential_cdf(-1.0, 2.0).unwrap(), 0.0);
        assert!(exponential_cdf(1.0, 0.0).is_err());
    }

    #[test]
    fn test_poisson_pmf_closed_form() {
        let lambda: f64 = 3.0;
        assert_relative_eq!(poisson_pmf(0, lambda).unwrap(), (-lambda).exp(), epsilon = 1e-12);
        assert_relative_eq!(
            poisson_pmf(2, lambda).unwrap(),
            (-lambda).exp() * lambda * lambda / 2.0,
            epsilon = 1e-12
        );
        let total: f64 = (0..60).map(|k| poisson_pmf(k, lambda).unwrap()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-10);
        assert!(poisson_pmf(1, -1.0).is_err());
    }
}
