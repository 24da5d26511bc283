//! Logging and observability
//!
//! This module provides the process logging sink:
//! - Pretty, colorized console output at level 0
//! - JSON-formatted logs at levels 1-4
//! - Output to stdout or an append-mode log file
//!
//! # Example
//!
//! ```no_run
//! use strata::config::LoggingConfig;
//! use strata::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let guard = init_logging(&config).expect("Failed to initialize logging");
//!
//! guard.in_scope(|| tracing::info!("Configuration resolved"));
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log where a resolved option came from
///
/// Secret values are replaced before they reach the log.
///
/// # Example
///
/// ```no_run
/// use strata::log_option_resolved;
///
/// log_option_resolved!("db-host", "localhost", "default", false);
/// log_option_resolved!("db-password", "root", "environment", true);
/// ```
#[macro_export]
macro_rules! log_option_resolved {
    ($name:expr, $value:expr, $source:expr, $secret:expr) => {
        if $secret {
            tracing::debug!(
                option = $name,
                value = "[REDACTED]",
                source = %$source,
                "Resolved option"
            );
        } else {
            tracing::debug!(
                option = $name,
                value = %$value,
                source = %$source,
                "Resolved option"
            );
        }
    };
}
