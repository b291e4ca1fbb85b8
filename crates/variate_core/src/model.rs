//! Per-family sampling and expectation capability.
//!
//! [`VariateModel`] bundles what the pipeline needs from a distribution:
//! draw a sample, choose a binning for it, and produce the matching expected
//! frequencies. [`DistributionParameters`] implements it by static enum
//! dispatch, so the pipeline never branches on the family itself.

use crate::binning::BinningSpec;
use crate::error::{Result, VariateError};
use crate::expected::{
    expected_exponential_frequencies, expected_normal_frequencies, expected_poisson_frequencies,
    expected_uniform_frequencies,
};
use crate::generators::{generate_exponential, generate_normal, generate_poisson, generate_uniform};
use crate::params::{DistributionKind, DistributionParameters};
use crate::rng::RandomSource;
use crate::sample::Sample;

/// Sampling and null-hypothesis expectation for one distribution.
pub trait VariateModel {
    /// Family of the model.
    fn kind(&self) -> DistributionKind;

    /// Draws `n` variates.
    fn generate<R: RandomSource + ?Sized>(&self, n: usize, source: &mut R) -> Result<Sample>;

    /// Binning used to test `sample`.
    ///
    /// `bin_count` applies to continuous families only.
    fn binning_for(&self, sample: &Sample, bin_count: usize) -> Result<BinningSpec>;

    /// Expected count per bin for a sample of size `n`.
    fn expected_frequencies(&self, n: usize, binning: &BinningSpec) -> Result<Vec<f64>>;
}

impl VariateModel for DistributionParameters {
    fn kind(&self) -> DistributionKind {
        DistributionParameters::kind(self)
    }

    fn generate<R: RandomSource + ?Sized>(&self, n: usize, source: &mut R) -> Result<Sample> {
        match *self {
            Self::Uniform { a, b } => generate_uniform(a, b, n, source).map(Sample::Continuous),
            Self::Normal { mu, sigma } => {
                generate_normal(mu, sigma, n, source).map(Sample::Continuous)
            }
            Self::Exponential { lambda } => {
                generate_exponential(lambda, n, source).map(Sample::Continuous)
            }
            Self::Poisson { lambda } => generate_poisson(lambda, n, source).map(Sample::Discrete),
        }
    }

    fn binning_for(&self, sample: &Sample, bin_count: usize) -> Result<BinningSpec> {
        match *self {
            // The theoretical support is known, so bin over it
            Self::Uniform { a, b } => BinningSpec::continuous(bin_count, a, b),
            _ => BinningSpec::for_sample(sample, bin_count),
        }
    }

    fn expected_frequencies(&self, n: usize, binning: &BinningSpec) -> Result<Vec<f64>> {
        match (*self, *binning) {
            (Self::Uniform { a, b }, BinningSpec::Continuous { bin_count, .. }) => {
                expected_uniform_frequencies(a, b, n, bin_count)
            }
            (Self::Normal { mu, sigma }, _) => expected_normal_frequencies(mu, sigma, n, binning),
            (Self::Exponential { lambda }, _) => {
                expected_exponential_frequencies(lambda, n, binning)
            }
            (Self::Poisson { lambda }, BinningSpec::Discrete { lower, bin_count }) => {
                expected_poisson_frequencies(lambda, n, lower, bin_count)
            }
            (Self::Uniform { a, b }, BinningSpec::Discrete { .. }) => {
                Err(VariateError::BinningMismatch {
                    value: a,
                    lower: a,
                    upper: b,
                })
            }
            (Self::Poisson { .. }, BinningSpec::Continuous { lower, upper, .. }) => {
                Err(VariateError::BinningMismatch {
                    value: lower,
                    lower,
                    upper,
                })
            }
        }
    }
}
