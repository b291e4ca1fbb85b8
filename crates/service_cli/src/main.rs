//! Variate CLI - Goodness-of-Fit Testing for Random Variate Generators
//!
//! Generates samples from uniform, normal, exponential and Poisson
//! distributions, bins them, and tests the histogram against the theoretical
//! frequencies with Pearson's chi-square statistic.
//!
//! # Commands
//!
//! - `variate` / `variate interactive` - Menu-driven session
//! - `variate run --distribution <kind> --n <n>` - One non-interactive cycle
//!
//! # Configuration
//!
//! Settings come from `variate.toml`, then `VARIATE_*` environment
//! variables, then command-line flags. `RUST_LOG` overrides the configured
//! log level. Logs go to stderr so they never interleave with the session.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use variate_core::params::DistributionKind;
use variate_report::ReportFormat;

mod commands;
mod config;
mod critical;
mod error;

pub use error::{CliError, Result};

use commands::run::RunArgs;
use config::{build_config, CliArgs, DEFAULT_CONFIG_FILE};

/// Random variate generator with chi-square goodness-of-fit testing
#[derive(Parser)]
#[command(name = "variate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Seed for the random source
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Menu-driven session (default)
    Interactive,

    /// Run a single generate-and-test cycle
    Run {
        /// Distribution (uniform, normal, exponential, poisson)
        #[arg(short, long)]
        distribution: DistributionKind,

        /// Sample size
        #[arg(short, long)]
        n: usize,

        /// Uniform lower bound
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        a: f64,

        /// Uniform upper bound
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        b: f64,

        /// Normal mean
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        mu: f64,

        /// Normal standard deviation
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        sigma: f64,

        /// Exponential rate or Poisson mean
        #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
        lambda: f64,

        /// Number of bins (default ceil(sqrt(n)))
        #[arg(long)]
        bins: Option<usize>,

        /// Critical value (default: chi-square quantile at the configured alpha)
        #[arg(long, allow_negative_numbers = true)]
        critical: Option<f64>,

        /// Export directory for the report
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Report format (csv, json)
        #[arg(short, long)]
        format: Option<ReportFormat>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = build_config(&CliArgs {
        config_file: cli.config.clone(),
        seed: cli.seed,
        verbose: cli.verbose,
    })?;

    // Initialise tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration loaded");

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => commands::interactive::run(&config)?,
        Commands::Run {
            distribution,
            n,
            a,
            b,
            mu,
            sigma,
            lambda,
            bins,
            critical,
            export,
            format,
        } => {
            let args = RunArgs {
                distribution,
                n,
                a,
                b,
                mu,
                sigma,
                lambda,
                bins,
                critical,
                export,
                format,
            };
            commands::run::run(&args, &config)?
        }
    }

    Ok(())
}
