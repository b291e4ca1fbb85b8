//! # Goodness-of-Fit Reports
//!
//! Presentation side of a variate cycle. Consumes the labelled
//! `(label, observed, expected)` rows and the chi-square summary produced by
//! `variate_core` and renders them.
//!
//! ## Modules
//!
//! - [`report`]: the [`Report`] model and [`ReportFormat`]
//! - [`sink`]: file sinks, [`CsvWriter`] for spreadsheets and [`JsonWriter`]
//! - [`chart`]: terminal bar chart of observed against expected counts

pub mod chart;
pub mod error;
pub mod report;
pub mod sink;

pub use error::ReportError;
pub use report::{Report, ReportFormat};
pub use sink::{sink_for, CsvWriter, JsonWriter, ReportSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::chart::render_bar_chart;
    pub use crate::report::{Report, ReportFormat};
    pub use crate::sink::{sink_for, CsvWriter, JsonWriter, ReportSink};
}
