//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, `VARIATE_*` environment
//! variables, and CLI arguments.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use variate_report::ReportFormat;

/// Export file format, as configured.
pub type ExportFormat = ReportFormat;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "variate.toml";

/// Largest accepted number of decimals in bin labels
pub const MAX_LABEL_PRECISION: usize = 12;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Environment variable {var} has invalid value '{value}'")]
    EnvError { var: &'static str, value: String },

    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Variate CLI configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VariateConfig {
    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,
    /// Significance level used to suggest a critical value
    pub alpha: f64,
    /// Fixed bin count; `ceil(sqrt(n))` when absent
    pub bin_count: Option<usize>,
    /// Decimals in continuous bin labels
    pub label_precision: usize,
    /// Log level
    pub log_level: LogLevel,
    /// Directory that receives a report after every cycle
    pub export_dir: Option<PathBuf>,
    /// Report format
    pub export_format: ExportFormat,
}

impl Default for VariateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            alpha: 0.05,
            bin_count: None,
            label_precision: 4,
            log_level: LogLevel::default(),
            export_dir: None,
            export_format: ExportFormat::Csv,
        }
    }
}

impl VariateConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from `path`, or defaults if the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply `VARIATE_*` environment variable overrides
    pub fn with_env_override(self) -> Result<Self, ConfigError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        fn parse<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
            value
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError { var, value })
        }

        if let Some(seed) = lookup("VARIATE_SEED") {
            self.seed = Some(parse("VARIATE_SEED", seed)?);
        }
        if let Some(alpha) = lookup("VARIATE_ALPHA") {
            self.alpha = parse("VARIATE_ALPHA", alpha)?;
        }
        if let Some(bins) = lookup("VARIATE_BINS") {
            self.bin_count = Some(parse("VARIATE_BINS", bins)?);
        }
        if let Some(precision) = lookup("VARIATE_LABEL_PRECISION") {
            self.label_precision = parse("VARIATE_LABEL_PRECISION", precision)?;
        }
        if let Some(level) = lookup("VARIATE_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(dir) = lookup("VARIATE_EXPORT_DIR") {
            self.export_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = lookup("VARIATE_EXPORT_FORMAT") {
            self.export_format = parse("VARIATE_EXPORT_FORMAT", format)?;
        }

        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            errors.push(format!("alpha must lie in (0, 1), got {}", self.alpha));
        }

        if self.label_precision > MAX_LABEL_PRECISION {
            errors.push(format!(
                "label_precision {} exceeds maximum allowed ({})",
                self.label_precision, MAX_LABEL_PRECISION
            ));
        }

        if self.bin_count == Some(0) {
            errors.push("bin_count must be greater than 0".to_string());
        }

        if let Some(dir) = &self.export_dir {
            if dir.as_os_str().is_empty() {
                errors.push("export_dir cannot be empty".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(seed) = cli.seed {
            self.seed = Some(seed);
        }
        if cli.verbose && self.log_level != LogLevel::Trace {
            self.log_level = LogLevel::Debug;
        }
    }
}

/// CLI arguments that feed into configuration
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: PathBuf,
    /// Seed override
    pub seed: Option<u64>,
    /// Verbose logging
    pub verbose: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<VariateConfig, ConfigError> {
    let mut config = VariateConfig::load_or_default(&cli.config_file)?.with_env_override()?;

    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = VariateConfig::default();
        assert_eq!(config.seed, None);
        assert_eq!(config.alpha, 0.05);
        assert_eq!(config.bin_count, None);
        assert_eq!(config.label_precision, 4);
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("trace").unwrap(), LogLevel::Trace);
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::from_str("Info").unwrap(), LogLevel::Info);
        assert!(LogLevel::from_str("loud").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
seed = 1234
alpha = 0.01
bin_count = 8
log_level = "debug"
export_dir = "out"
export_format = "json"
"#
        )
        .unwrap();

        let config = VariateConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.alpha, 0.01);
        assert_eq!(config.bin_count, Some(8));
        assert_eq!(config.label_precision, 4);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.export_dir, Some(PathBuf::from("out")));
        assert_eq!(config.export_format, ExportFormat::Json);
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = VariateConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, VariateConfig::default());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "alpha = \"high\"").unwrap();
        assert!(matches!(
            VariateConfig::load_or_default(file.path()),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = VariateConfig::default()
            .with_overrides_from(env(&[
                ("VARIATE_SEED", "99"),
                ("VARIATE_ALPHA", "0.1"),
                ("VARIATE_BINS", "6"),
                ("VARIATE_EXPORT_FORMAT", "json"),
            ]))
            .unwrap();
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.alpha, 0.1);
        assert_eq!(config.bin_count, Some(6));
        assert_eq!(config.export_format, ExportFormat::Json);
    }

    #[test]
    fn test_invalid_env_value() {
        let err = VariateConfig::default()
            .with_overrides_from(env(&[("VARIATE_SEED", "minus one")]))
            .unwrap_err();
        assert!(err.to_string().contains("VARIATE_SEED"));
    }

    #[test]
    fn test_validation_collects_all_errors() {
        let config = VariateConfig {
            alpha: 1.5,
            label_precision: 30,
            bin_count: Some(0),
            ..VariateConfig::default()
        };
        match config.validate() {
            Err(ConfigError::Validation(errors)) => assert_eq!(errors.len(), 3),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = VariateConfig {
            seed: Some(1),
            ..VariateConfig::default()
        };
        config.merge_with_cli(&CliArgs {
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            seed: Some(2),
            verbose: true,
        });
        assert_eq!(config.seed, Some(2));
        assert_eq!(config.log_level, LogLevel::Debug);
    }
}
