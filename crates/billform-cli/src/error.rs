//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// billform library error
    #[error("{0}")]
    Billform(#[from] billform::BillformError),

    /// JSON rendering error
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),

    /// One or more scenarios failed
    #[error("{failed} of {total} scenario(s) failed")]
    ScenarioFailed {
        /// Failed scenario count
        failed: usize,
        /// Total scenario count
        total: usize,
    },

    /// Address evaluated as disabled under --require-enabled
    #[error("Submit is disabled for {input}")]
    SubmitDisabled {
        /// Input that was checked
        input: String,
    },
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
