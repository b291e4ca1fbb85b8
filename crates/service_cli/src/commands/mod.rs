//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. The helpers here are
//! shared by both: console rendering of a cycle and report export.

pub mod interactive;
pub mod run;

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use variate_core::prelude::*;
use variate_report::prelude::*;

use crate::Result;

/// Width of the terminal bar chart in cells
const CHART_WIDTH: usize = 40;

/// Random source for a session: seeded when a seed is configured.
pub(crate) fn random_source(seed: Option<u64>) -> SeededSource {
    match seed {
        Some(seed) => SeededSource::from_seed(seed),
        None => SeededSource::from_entropy(),
    }
}

pub(crate) fn log_cycle_start(params: &DistributionParameters, n: usize, bins: Option<usize>) {
    info!(
        distribution = %params,
        n,
        bins = bins.unwrap_or_else(|| default_bin_count(n)),
        "Running goodness-of-fit cycle"
    );
}

pub(crate) fn log_outcome(outcome: &CycleOutcome) {
    info!(
        distribution = %outcome.kind(),
        statistic = outcome.chi_square.statistic,
        degrees_of_freedom = outcome.chi_square.degrees_of_freedom,
        "Chi-square evaluated"
    );
    if outcome.chi_square.skipped_bins > 0 {
        warn!(
            skipped_bins = outcome.chi_square.skipped_bins,
            "Bins with zero expected frequency left out of the statistic"
        );
    }
}

/// Writes the frequency table, bar chart and chi-square summary.
pub(crate) fn write_outcome<W: Write>(
    out: &mut W,
    outcome: &CycleOutcome,
    precision: usize,
) -> io::Result<()> {
    let rows = outcome.table.rows(precision);
    let label_width = rows
        .iter()
        .map(|r| r.label.chars().count())
        .max()
        .unwrap_or(0)
        .max(5);

    writeln!(out)?;
    writeln!(
        out,
        "{} sample of {} ({} bins)",
        outcome.distribution,
        outcome.sample_size,
        outcome.table.len()
    )?;
    writeln!(
        out,
        "{:<w$}  {:>10}  {:>12}",
        "Bin",
        "Observed",
        "Expected",
        w = label_width
    )?;
    for row in &rows {
        writeln!(
            out,
            "{:<w$}  {:>10}  {:>12.4}",
            row.label,
            row.observed,
            row.expected,
            w = label_width
        )?;
    }
    writeln!(
        out,
        "{:<w$}  {:>10}  {:>12.4}",
        "Total",
        outcome.table.observed_total(),
        outcome.table.expected_total(),
        w = label_width
    )?;

    writeln!(out)?;
    write!(out, "{}", render_bar_chart(&rows, CHART_WIDTH))?;
    writeln!(out)?;

    writeln!(out, "Chi-square statistic: {:.4}", outcome.chi_square.statistic)?;
    writeln!(
        out,
        "Degrees of freedom:   {}",
        outcome.chi_square.degrees_of_freedom
    )?;
    if outcome.chi_square.skipped_bins > 0 {
        writeln!(
            out,
            "Note: {} bin(s) with zero expected frequency were left out",
            outcome.chi_square.skipped_bins
        )?;
    }
    Ok(())
}

/// Writes `report` into `dir` in `format` and returns the file path.
pub(crate) fn export_report(report: &Report, dir: &Path, format: ReportFormat) -> Result<PathBuf> {
    let path = sink_for(format, dir).send(report)?;
    Ok(path)
}
