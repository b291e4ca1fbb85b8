//! Error types for the variate CLI.

use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generation, binning or evaluation error
    #[error("{0}")]
    Variate(#[from] variate_core::VariateError),

    /// Report export error
    #[error("Export failed: {0}")]
    Report(#[from] variate_report::ReportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use variate_core::VariateError;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("--n must be positive");
        assert!(err.to_string().contains("--n must be positive"));

        let err: CliError = VariateError::invalid_parameter("sigma", -1.0, "must be positive").into();
        assert!(err.to_string().contains("sigma"));
    }
}
