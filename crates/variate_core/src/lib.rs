//! # variate_core: Variate Generation and Goodness-of-Fit Foundation
//!
//! Generates pseudo-random samples from four parametric distributions, bins
//! them into a frequency histogram, and measures the fit against the
//! theoretical expectation with a chi-square statistic.
//!
//! ## Pipeline
//!
//! ```text
//! DistributionParameters ──generate──▶ Sample ──histogram──▶ observed ─┐
//!          │                                                           ├─▶ ChiSquareResult
//!          └──────────────expected_frequencies──────────▶ expected ────┘
//! ```
//!
//! - Random source: [`rng::RandomSource`], with [`rng::SeededSource`] for
//!   reproducible runs
//! - Generators: [`generators`] (direct transform, inverse CDF, Knuth, Box-Muller)
//! - Binning: [`binning::BinningSpec`], continuous intervals or integer bins
//! - Expected frequencies: [`expected`], backed by `statrs` CDF/PMF evaluation
//! - Evaluation: [`chi_square::ChiSquareResult`] and [`chi_square::Verdict`]
//! - One cycle end to end: [`pipeline::run_cycle`]
//!
//! ## Usage Examples
//!
//! ```rust
//! use variate_core::prelude::*;
//!
//! let params = DistributionParameters::normal(0.0, 1.0).unwrap();
//! let mut rng = SeededSource::from_seed(2024);
//!
//! let outcome = run_cycle(&params, 2_000, None, &mut rng).unwrap();
//! assert_eq!(outcome.table.observed_total(), 2_000);
//!
//! // The critical value comes from outside, e.g. a chi-square table
//! let verdict = outcome.chi_square.verdict(1e6).unwrap();
//! assert_eq!(verdict, Verdict::FailToReject);
//! ```
//!
//! ## Threading
//!
//! Everything is sequential. A random source is a single-owner handle passed
//! by `&mut`; parallel generation would need one independently seeded source
//! per worker.

pub mod binning;
pub mod chi_square;
pub mod error;
pub mod expected;
pub mod generators;
pub mod model;
pub mod numeric;
pub mod params;
pub mod pipeline;
pub mod rng;
pub mod sample;

pub use error::{Result, VariateError};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::binning::BinningSpec;
    pub use crate::chi_square::{ChiSquareResult, Verdict};
    pub use crate::error::VariateError;
    pub use crate::model::VariateModel;
    pub use crate::params::{DistributionKind, DistributionParameters};
    pub use crate::pipeline::{
        default_bin_count, run_cycle, CycleOutcome, FrequencyRow, FrequencyTable,
    };
    pub use crate::rng::{RandomSource, SeededSource, SequenceSource};
    pub use crate::sample::Sample;
}
