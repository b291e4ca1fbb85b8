//! Distribution parameters and input validation.
//!
//! [`DistributionParameters`] is the tagged union of the four supported
//! families. Construction through the checked constructors guarantees the
//! invariants hold; values built directly from variants are re-checked by
//! [`DistributionParameters::validate`] before any sampling starts.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, VariateError};

/// Largest Poisson rate accepted by the multiplicative sampler.
///
/// `e^(-700)` is still a normal `f64`; far beyond this the threshold
/// underflows and the product loop stops meaning anything.
pub const MAX_POISSON_LAMBDA: f64 = 700.0;

/// The four supported distribution families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DistributionKind {
    /// Continuous uniform on [a, b)
    Uniform,
    /// Gaussian with mean mu and standard deviation sigma
    Normal,
    /// Exponential with rate lambda
    Exponential,
    /// Poisson with rate lambda
    Poisson,
}

impl DistributionKind {
    /// All families in menu order.
    pub const ALL: [DistributionKind; 4] = [
        DistributionKind::Uniform,
        DistributionKind::Normal,
        DistributionKind::Exponential,
        DistributionKind::Poisson,
    ];

    /// Lowercase name of the family.
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Uniform => "uniform",
            DistributionKind::Normal => "normal",
            DistributionKind::Exponential => "exponential",
            DistributionKind::Poisson => "poisson",
        }
    }

    /// True for families producing integer samples.
    pub fn is_discrete(&self) -> bool {
        matches!(self, DistributionKind::Poisson)
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionKind {
    type Err = String;

    /// Accepts family names, common abbreviations and menu numbers 1-4.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "uniform" | "u" => Ok(DistributionKind::Uniform),
            "2" | "normal" | "gaussian" | "n" => Ok(DistributionKind::Normal),
            "3" | "exponential" | "exp" | "e" => Ok(DistributionKind::Exponential),
            "4" | "poisson" | "p" => Ok(DistributionKind::Poisson),
            other => Err(format!(
                "Unknown distribution: {}. Supported: uniform, normal, exponential, poisson",
                other
            )),
        }
    }
}

/// Parameters of one distribution family.
///
/// # Examples
/// ```
/// use variate_core::params::DistributionParameters;
///
/// assert!(DistributionParameters::uniform(0.0, 10.0).is_ok());
/// assert!(DistributionParameters::uniform(10.0, 0.0).is_err());
/// assert!(DistributionParameters::poisson(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "distribution", rename_all = "lowercase"))]
pub enum DistributionParameters {
    /// Uniform on [a, b); requires b > a.
    Uniform {
        /// Lower bound
        a: f64,
        /// Upper bound
        b: f64,
    },
    /// Normal; requires sigma > 0.
    Normal {
        /// Mean
        mu: f64,
        /// Standard deviation
        sigma: f64,
    },
    /// Exponential; requires lambda > 0.
    Exponential {
        /// Rate
        lambda: f64,
    },
    /// Poisson; requires 0 < lambda <= [`MAX_POISSON_LAMBDA`].
    Poisson {
        /// Rate
        lambda: f64,
    },
}

impl DistributionParameters {
    /// Checked uniform constructor.
    pub fn uniform(a: f64, b: f64) -> Result<Self> {
        let params = Self::Uniform { a, b };
        params.validate()?;
        Ok(params)
    }

    /// Checked normal constructor.
    pub fn normal(mu: f64, sigma: f64) -> Result<Self> {
        let params = Self::Normal { mu, sigma };
        params.validate()?;
        Ok(params)
    }

    /// Checked exponential constructor.
    pub fn exponential(lambda: f64) -> Result<Self> {
        let params = Self::Exponential { lambda };
        params.validate()?;
        Ok(params)
    }

    /// Checked Poisson constructor.
    pub fn poisson(lambda: f64) -> Result<Self> {
        let params = Self::Poisson { lambda };
        params.validate()?;
        Ok(params)
    }

    /// Family of these parameters.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Uniform { .. } => DistributionKind::Uniform,
            Self::Normal { .. } => DistributionKind::Normal,
            Self::Exponential { .. } => DistributionKind::Exponential,
            Self::Poisson { .. } => DistributionKind::Poisson,
        }
    }

    /// Checks the family invariant.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Self::Uniform { a, b } => validate_uniform(a, b),
            Self::Normal { mu, sigma } => validate_normal(mu, sigma),
            Self::Exponential { lambda } => validate_rate("lambda", lambda),
            Self::Poisson { lambda } => validate_poisson(lambda),
        }
    }
}

impl fmt::Display for DistributionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform { a, b } => write!(f, "uniform(a={}, b={})", a, b),
            Self::Normal { mu, sigma } => write!(f, "normal(mu={}, sigma={})", mu, sigma),
            Self::Exponential { lambda } => write!(f, "exponential(lambda={})", lambda),
            Self::Poisson { lambda } => write!(f, "poisson(lambda={})", lambda),
        }
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(VariateError::invalid_parameter(name, value, "must be finite"))
    }
}

pub(crate) fn validate_uniform(a: f64, b: f64) -> Result<()> {
    require_finite("a", a)?;
    require_finite("b", b)?;
    if b <= a {
        return Err(VariateError::invalid_parameter(
            "b",
            b,
            "must be greater than a",
        ));
    }
    if !(b - a).is_finite() {
        return Err(VariateError::invalid_parameter(
            "b",
            b,
            "interval width b - a overflows",
        ));
    }
    Ok(())
}

pub(crate) fn validate_normal(mu: f64, sigma: f64) -> Result<()> {
    require_finite("mu", mu)?;
    require_finite("sigma", sigma)?;
    if sigma <= 0.0 {
        return Err(VariateError::invalid_parameter(
            "sigma",
            sigma,
            "must be positive",
        ));
    }
    Ok(())
}

pub(crate) fn validate_rate(name: &'static str, lambda: f64) -> Result<()> {
    require_finite(name, lambda)?;
    if lambda <= 0.0 {
        return Err(VariateError::invalid_parameter(
            name,
            lambda,
            "must be positive",
        ));
    }
    Ok(())
}

pub(crate) fn validate_poisson(lambda: f64) -> Result<()> {
    validate_rate("lambda", lambda)?;
    if lambda > MAX_POISSON_LAMBDA {
        return Err(VariateError::invalid_parameter(
            "lambda",
            lambda,
            "exceeds the range of the multiplicative Poisson sampler (700)",
        ));
    }
    Ok(())
}

/// Rejects an empty sample size.
pub fn validate_sample_size(n: usize) -> Result<()> {
    if n == 0 {
        return Err(VariateError::invalid_parameter(
            "n",
            0.0,
            "must be at least 1",
        ));
    }
    Ok(())
}

/// Rejects a histogram with no bins.
pub fn validate_bin_count(bin_count: usize) -> Result<()> {
    if bin_count == 0 {
        return Err(VariateError::invalid_parameter(
            "bin_count",
            0.0,
            "must be at least 1",
        ));
    }
    Ok(())
}
