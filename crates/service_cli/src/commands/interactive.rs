//! Interactive menu shell
//!
//! Repeats generate, bin, evaluate and decide cycles until the user exits
//! or input ends. Invalid entries are reported and asked again.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::{debug, info};
use variate_core::prelude::*;
use variate_core::params::validate_sample_size;
use variate_report::Report;

use super::{export_report, log_cycle_start, log_outcome, random_source, write_outcome};
use crate::config::VariateConfig;
use crate::critical::suggest_critical_value;
use crate::Result;

/// Menu entry chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Run a cycle for a distribution family
    Distribution(DistributionKind),
    /// Leave the shell
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5" | "exit" | "quit" | "q" => Ok(MenuChoice::Exit),
            other => other
                .parse::<DistributionKind>()
                .map(MenuChoice::Distribution)
                .map_err(|_| format!("Invalid option '{}'. Choose 1-5.", s.trim())),
        }
    }
}

/// Menu shell over any line-oriented input and output.
pub struct Shell<'a, R, W> {
    input: R,
    output: W,
    config: &'a VariateConfig,
    source: SeededSource,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a shell; the random source persists across cycles.
    pub fn new(input: R, output: W, config: &'a VariateConfig) -> Self {
        Self {
            input,
            output,
            config,
            source: random_source(config.seed),
        }
    }

    /// Run the menu loop until exit or end of input.
    pub fn run(&mut self) -> Result<()> {
        info!(seed = self.source.seed(), "Interactive session started");
        loop {
            self.write_menu()?;
            let Some(line) = self.prompt("Select an option: ")? else {
                break;
            };
            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Exit) => break,
                Ok(MenuChoice::Distribution(kind)) => {
                    if !self.run_cycle(kind)? {
                        break;
                    }
                }
                Err(msg) => writeln!(self.output, "{}", msg)?,
            }
        }
        writeln!(self.output, "Goodbye.")?;
        info!("Interactive session ended");
        Ok(())
    }

    fn write_menu(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Random variate generator")?;
        writeln!(self.output, "  1. Uniform")?;
        writeln!(self.output, "  2. Normal")?;
        writeln!(self.output, "  3. Exponential")?;
        writeln!(self.output, "  4. Poisson")?;
        writeln!(self.output, "  5. Exit")
    }

    /// One full cycle; `Ok(false)` when input ended midway.
    fn run_cycle(&mut self, kind: DistributionKind) -> Result<bool> {
        let Some(n) = self.prompt_parsed("Sample size n: ", |n: &usize| {
            validate_sample_size(*n).map_err(|e| e.to_string())
        })?
        else {
            return Ok(false);
        };

        let Some(params) = self.prompt_parameters(kind)? else {
            return Ok(false);
        };

        log_cycle_start(&params, n, self.config.bin_count);
        let outcome = match variate_core::pipeline::run_cycle(
            &params,
            n,
            self.config.bin_count,
            &mut self.source,
        ) {
            Ok(outcome) => outcome,
            Err(e) => {
                writeln!(self.output, "Cycle failed: {}", e)?;
                return Ok(true);
            }
        };
        log_outcome(&outcome);
        write_outcome(&mut self.output, &outcome, self.config.label_precision)?;

        let suggestion =
            suggest_critical_value(outcome.chi_square.degrees_of_freedom, self.config.alpha);
        let Some((critical, verdict)) = self.prompt_decision(&outcome.chi_square, suggestion)?
        else {
            return Ok(false);
        };
        writeln!(
            self.output,
            "Statistic {:.4} vs critical value {:.4}: {}",
            outcome.chi_square.statistic, critical, verdict
        )?;

        if let Some(dir) = &self.config.export_dir {
            let report = Report::from_outcome(&outcome, self.config.label_precision)
                .with_decision(critical, verdict)
                .with_seed(self.source.seed());
            match export_report(&report, dir, self.config.export_format) {
                Ok(path) => writeln!(self.output, "Report written to {}", path.display())?,
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
        Ok(true)
    }

    fn prompt_parameters(&mut self, kind: DistributionKind) -> Result<Option<DistributionParameters>> {
        loop {
            let params = match kind {
                DistributionKind::Uniform => {
                    let Some(a) = self.prompt_number("Lower bound a: ")? else {
                        return Ok(None);
                    };
                    let Some(b) = self.prompt_number("Upper bound b: ")? else {
                        return Ok(None);
                    };
                    DistributionParameters::uniform(a, b)
                }
                DistributionKind::Normal => {
                    let Some(mu) = self.prompt_number("Mean mu: ")? else {
                        return Ok(None);
                    };
                    let Some(sigma) = self.prompt_number("Standard deviation sigma: ")? else {
                        return Ok(None);
                    };
                    DistributionParameters::normal(mu, sigma)
                }
                DistributionKind::Exponential => {
                    let Some(lambda) = self.prompt_number("Rate lambda: ")? else {
                        return Ok(None);
                    };
                    DistributionParameters::exponential(lambda)
                }
                DistributionKind::Poisson => {
                    let Some(lambda) = self.prompt_number("Mean lambda: ")? else {
                        return Ok(None);
                    };
                    DistributionParameters::poisson(lambda)
                }
            };
            match params {
                Ok(params) => return Ok(Some(params)),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn prompt_decision(
        &mut self,
        result: &ChiSquareResult,
        suggestion: Option<f64>,
    ) -> Result<Option<(f64, Verdict)>> {
        let message = match suggestion {
            Some(value) => format!(
                "Critical value (Enter for {:.4}, alpha = {}): ",
                value, self.config.alpha
            ),
            None => "Critical value: ".to_string(),
        };
        loop {
            let Some(line) = self.prompt(&message)? else {
                return Ok(None);
            };
            let critical = match (line.is_empty(), suggestion) {
                (true, Some(value)) => value,
                (true, None) => {
                    writeln!(self.output, "No suggestion available; enter a value.")?;
                    continue;
                }
                (false, _) => match line.parse::<f64>() {
                    Ok(value) => value,
                    Err(_) => {
                        writeln!(self.output, "'{}' is not a number.", line)?;
                        continue;
                    }
                },
            };
            match result.verdict(critical) {
                Ok(verdict) => return Ok(Some((critical, verdict))),
                Err(e) => writeln!(self.output, "{}", e)?,
            }
        }
    }

    fn prompt_number(&mut self, message: &str) -> Result<Option<f64>> {
        self.prompt_parsed(message, |x: &f64| {
            if x.is_finite() {
                Ok(())
            } else {
                Err("Value must be finite.".to_string())
            }
        })
    }

    /// Prompt until the entry parses and passes `check`; `None` on end of input.
    fn prompt_parsed<T, F>(&mut self, message: &str, check: F) -> Result<Option<T>>
    where
        T: FromStr,
        F: Fn(&T) -> std::result::Result<(), String>,
    {
        loop {
            let Some(line) = self.prompt(message)? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => match check(&value) {
                    Ok(()) => return Ok(Some(value)),
                    Err(msg) => writeln!(self.output, "{}", msg)?,
                },
                Err(_) => writeln!(self.output, "'{}' is not valid here.", line)?,
            }
        }
    }

    /// Write `message` and read one trimmed line; `None` on end of input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            debug!("End of input");
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Run the interactive shell on stdin/stdout
pub fn run(config: &VariateConfig) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(stdin.lock(), stdout.lock(), config).run()
}
