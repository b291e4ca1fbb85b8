//! Run command implementation
//!
//! One non-interactive cycle: generate, bin, evaluate, decide, and
//! optionally export.

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::info;
use variate_core::prelude::*;
use variate_report::{Report, ReportFormat};

use super::{export_report, log_cycle_start, log_outcome, random_source, write_outcome};
use crate::config::VariateConfig;
use crate::critical::suggest_critical_value;
use crate::{CliError, Result};

/// Arguments of a single cycle
#[derive(Debug, Clone)]
pub struct RunArgs {
    /// Distribution family
    pub distribution: DistributionKind,
    /// Sample size
    pub n: usize,
    /// Uniform lower bound
    pub a: f64,
    /// Uniform upper bound
    pub b: f64,
    /// Normal mean
    pub mu: f64,
    /// Normal standard deviation
    pub sigma: f64,
    /// Exponential rate or Poisson mean
    pub lambda: f64,
    /// Bin count override
    pub bins: Option<usize>,
    /// Critical value; the (1 - alpha) quantile when absent
    pub critical: Option<f64>,
    /// Export directory override
    pub export: Option<PathBuf>,
    /// Export format override
    pub format: Option<ReportFormat>,
}

impl RunArgs {
    /// Distribution parameters for the selected family
    pub fn parameters(&self) -> Result<DistributionParameters> {
        let params = match self.distribution {
            DistributionKind::Uniform => DistributionParameters::uniform(self.a, self.b),
            DistributionKind::Normal => DistributionParameters::normal(self.mu, self.sigma),
            DistributionKind::Exponential => DistributionParameters::exponential(self.lambda),
            DistributionKind::Poisson => DistributionParameters::poisson(self.lambda),
        }?;
        Ok(params)
    }
}

/// Run the run command, printing to stdout
pub fn run(args: &RunArgs, config: &VariateConfig) -> Result<()> {
    let stdout = io::stdout();
    execute(args, config, &mut stdout.lock())
}

/// Run one cycle and write the results to `out`.
pub fn execute<W: Write>(args: &RunArgs, config: &VariateConfig, out: &mut W) -> Result<()> {
    let params = args.parameters()?;
    let bins = args.bins.or(config.bin_count);
    if bins == Some(0) {
        return Err(CliError::invalid_argument("--bins must be at least 1"));
    }

    let mut source = random_source(config.seed);
    log_cycle_start(&params, args.n, bins);
    let outcome = run_cycle(&params, args.n, bins, &mut source)?;
    log_outcome(&outcome);
    write_outcome(out, &outcome, config.label_precision)?;

    let critical = args.critical.or_else(|| {
        suggest_critical_value(outcome.chi_square.degrees_of_freedom, config.alpha)
    });
    let mut report = Report::from_outcome(&outcome, config.label_precision).with_seed(source.seed());

    match critical {
        Some(critical) => {
            let verdict = outcome.chi_square.verdict(critical)?;
            writeln!(
                out,
                "Statistic {:.4} vs critical value {:.4}: {}",
                outcome.chi_square.statistic, critical, verdict
            )?;
            info!(critical, verdict = %verdict, "Decision made");
            report = report.with_decision(critical, verdict);
        }
        None => writeln!(out, "No critical value available for a single bin")?,
    }

    let export_dir = args.export.as_ref().or(config.export_dir.as_ref());
    if let Some(dir) = export_dir {
        let format = args.format.unwrap_or(config.export_format);
        let path = export_report(&report, dir, format)?;
        writeln!(out, "Report written to {}", path.display())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(distribution: DistributionKind) -> RunArgs {
        RunArgs {
            distribution,
            n: 400,
            a: 0.0,
            b: 1.0,
            mu: 0.0,
            sigma: 1.0,
            lambda: 2.5,
            bins: None,
            critical: None,
            export: None,
            format: None,
        }
    }

    fn config() -> VariateConfig {
        VariateConfig {
            seed: Some(8),
            ..VariateConfig::default()
        }
    }

    #[test]
    fn test_parameters_follow_family() {
        let p = args(DistributionKind::Normal).parameters().unwrap();
        assert_eq!(p, DistributionParameters::Normal { mu: 0.0, sigma: 1.0 });

        let p = args(DistributionKind::Poisson).parameters().unwrap();
        assert_eq!(p, DistributionParameters::Poisson { lambda: 2.5 });
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let mut bad = args(DistributionKind::Uniform);
        bad.b = -1.0;
        assert!(matches!(bad.parameters(), Err(CliError::Variate(_))));
    }

    #[test]
    fn test_every_family_runs() {
        for kind in DistributionKind::ALL {
            let mut out = Vec::new();
            execute(&args(kind), &config(), &mut out).unwrap();
            let text = String::from_utf8(out).unwrap();
            assert!(text.contains("Chi-square statistic:"));
            assert!(text.contains("H0"));
        }
    }

    #[test]
    fn test_zero_bins_rejected() {
        let mut zero = args(DistributionKind::Uniform);
        zero.bins = Some(0);
        let mut out = Vec::new();
        assert!(matches!(
            execute(&zero, &config(), &mut out),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_export_override() {
        let dir = tempfile::tempdir().unwrap();
        let mut with_export = args(DistributionKind::Exponential);
        with_export.export = Some(dir.path().to_path_buf());
        with_export.format = Some(ReportFormat::Json);
        with_export.critical = Some(1e9);

        let mut out = Vec::new();
        execute(&with_export, &config(), &mut out).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].extension().and_then(|e| e.to_str()), Some("json"));

        let report: Report =
            serde_json::from_str(&std::fs::read_to_string(&entries[0]).unwrap()).unwrap();
        assert_eq!(report.verdict, Some(Verdict::FailToReject));
        assert_eq!(report.seed, Some(8));
    }
}
