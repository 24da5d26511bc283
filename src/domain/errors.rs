//! Domain error types
//!
//! This module defines the error hierarchy for Strata. All errors carry
//! plain messages and don't expose third-party types.

use thiserror::Error;

/// Main Strata error type
///
/// Every stage of startup resolution reports failures through this type.
/// Apart from `DisplayRequested`, each variant is a fatal startup fault:
/// the caller must not continue with a partially built configuration.
#[derive(Debug, Error)]
pub enum StrataError {
    /// Malformed command-line input (unknown flag, missing value, bad integer)
    #[error("Argument error: {0}")]
    Arguments(String),

    /// `--help` or `--version` was requested; carries the rendered text
    #[error("{0}")]
    DisplayRequested(String),

    /// Configuration-related errors (bad environment values, unknown options)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A resolved value violates a field constraint
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl StrataError {
    /// Whether the error stems from the command line rather than the
    /// resolved values, so the caller can print usage instead of a fault.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            StrataError::Arguments(_) | StrataError::DisplayRequested(_)
        )
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for StrataError {
    fn from(err: std::io::Error) -> Self {
        StrataError::Io(err.to_string())
    }
}

// Conversion from clap parse errors
impl From<clap::Error> for StrataError {
    fn from(err: clap::Error) -> Self {
        use clap::error::ErrorKind;

        match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                StrataError::DisplayRequested(err.render().to_string())
            }
            _ => StrataError::Arguments(err.render().to_string().trim_end().to_string()),
        }
    }
}
