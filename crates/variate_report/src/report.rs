//! Report model shared by every sink.

use serde::{Deserialize, Serialize};
use variate_core::chi_square::Verdict;
use variate_core::params::{DistributionKind, DistributionParameters};
use variate_core::pipeline::{CycleOutcome, FrequencyRow};

/// Output format of a report file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Comma-separated spreadsheet
    #[default]
    Csv,
    /// Pretty-printed JSON
    Json,
}

impl ReportFormat {
    /// Get file extension
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
            ReportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("Unknown format: {}. Supported: csv, json", other)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Everything a sink needs to render one goodness-of-fit cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Distribution and parameters the sample was drawn from
    pub distribution: DistributionParameters,
    /// Number of variates
    pub sample_size: usize,
    /// One row per bin
    pub rows: Vec<FrequencyRow>,
    /// Chi-square statistic
    pub statistic: f64,
    /// Bins minus one
    pub degrees_of_freedom: usize,
    /// Bins left out of the statistic because nothing was expected there
    pub skipped_bins: usize,
    /// Critical value the statistic was compared with, if any
    pub critical_value: Option<f64>,
    /// Decision, if a critical value was supplied
    pub verdict: Option<Verdict>,
    /// Seed of the random source, for replay
    pub seed: Option<u64>,
    /// RFC 3339 generation time
    pub generated_at: String,
}

impl Report {
    /// Builds a report from a cycle outcome, labelling continuous bin edges
    /// with `precision` decimals.
    pub fn from_outcome(outcome: &CycleOutcome, precision: usize) -> Self {
        Self {
            distribution: outcome.distribution,
            sample_size: outcome.sample_size,
            rows: outcome.table.rows(precision),
            statistic: outcome.chi_square.statistic,
            degrees_of_freedom: outcome.chi_square.degrees_of_freedom,
            skipped_bins: outcome.chi_square.skipped_bins,
            critical_value: None,
            verdict: None,
            seed: None,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Attaches the critical value and the resulting verdict.
    pub fn with_decision(mut self, critical_value: f64, verdict: Verdict) -> Self {
        self.critical_value = Some(critical_value);
        self.verdict = Some(verdict);
        self
    }

    /// Records the seed that produced the sample.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Distribution family.
    pub fn kind(&self) -> DistributionKind {
        self.distribution.kind()
    }

    /// Sum of observed counts.
    pub fn observed_total(&self) -> u64 {
        self.rows.iter().map(|r| r.observed).sum()
    }

    /// Sum of expected counts.
    pub fn expected_total(&self) -> f64 {
        self.rows.iter().map(|r| r.expected).sum()
    }

    /// Summary as `(key, value)` pairs, in display order.
    pub fn summary(&self) -> Vec<(&'static str, String)> {
        let mut summary = vec![
            ("distribution", self.distribution.to_string()),
            ("n", self.sample_size.to_string()),
            ("statistic", format!("{:.6}", self.statistic)),
            ("degrees_of_freedom", self.degrees_of_freedom.to_string()),
            ("skipped_bins", self.skipped_bins.to_string()),
        ];
        if let Some(critical) = self.critical_value {
            summary.push(("critical_value", format!("{:.6}", critical)));
        }
        if let Some(verdict) = self.verdict {
            summary.push(("verdict", verdict.to_string()));
        }
        if let Some(seed) = self.seed {
            summary.push(("seed", seed.to_string()));
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use variate_core::pipeline::run_cycle;
    use variate_core::rng::SeededSource;

    fn sample_report() -> Report {
        let params = DistributionParameters::uniform(0.0, 10.0).unwrap();
        let mut rng = SeededSource::from_seed(42);
        let outcome = run_cycle(&params, 100, Some(5), &mut rng).unwrap();
        Report::from_outcome(&outcome, 2)
    }

    #[test]
    fn test_from_outcome() {
        let report = sample_report();
        assert_eq!(report.rows.len(), 5);
        assert_eq!(report.observed_total(), 100);
        assert_eq!(report.rows[0].label, "[0.00, 2.00)");
        assert_eq!(report.kind(), DistributionKind::Uniform);
        assert!(report.verdict.is_none());
    }

    #[test]
    fn test_summary_includes_decision_when_present() {
        let report = sample_report();
        assert_eq!(report.summary().len(), 5);

        let report = report.with_decision(9.488, Verdict::FailToReject).with_seed(42);
        let summary = report.summary();
        assert!(summary.contains(&("verdict", "fail to reject H0".to_string())));
        assert!(summary.contains(&("critical_value", "9.488000".to_string())));
        assert!(summary.contains(&("seed", "42".to_string())));
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ReportFormat>().unwrap(), ReportFormat::Csv);
        assert_eq!("json".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("xlsx".parse::<ReportFormat>().is_err());
        assert_eq!(ReportFormat::default().extension(), "csv");
    }
}
