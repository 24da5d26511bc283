//! Structured logging setup using tracing
//!
//! Builds the single logging sink for the process. Level 0 renders
//! human-readable, colorized output; every other level renders JSON. Both
//! formats carry a timestamp, the event target, file and line of the call
//! site, and the enclosing span context.
//!
//! The sink is returned as an explicit [`LoggingGuard`] handle instead of
//! being installed behind the caller's back. The binary installs it as the
//! global default; library callers and tests can scope it with
//! [`LoggingGuard::in_scope`].
//!
//! # Example
//!
//! ```no_run
//! use strata::config::LoggingConfig;
//! use strata::logging::init_logging;
//!
//! let guard = init_logging(&LoggingConfig::default()).expect("Failed to initialize logging");
//! guard.install_global().expect("Failed to install logger");
//! tracing::info!("Application started");
//! // Keep `guard` alive for the duration of the program
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, StrataError};
use std::fs::OpenOptions;
use tracing::Dispatch;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{Layer, Registry};

/// Handle to the process logging sink
///
/// Must be kept alive for as long as anything logs: dropping it flushes
/// buffered output and stops the background writer.
pub struct LoggingGuard {
    dispatch: Dispatch,
    _writer_guard: WorkerGuard,
}

impl LoggingGuard {
    /// Run `f` with this sink as the thread's default subscriber
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }

    /// Install this sink as the global default subscriber
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a global subscriber is already set.
    pub fn install_global(&self) -> Result<()> {
        tracing::dispatcher::set_global_default(self.dispatch.clone()).map_err(|e| {
            StrataError::Configuration(format!("Failed to install global logger: {e}"))
        })
    }
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

/// Initialize the logging sink described by `config`
///
/// A configured output file is opened in append mode and created if
/// absent; without one, logs go to stdout.
///
/// # Errors
///
/// Returns [`StrataError::Io`] if the log file cannot be opened. There is no
/// fallback to stdout.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let (writer, writer_guard) = match &config.output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    StrataError::Io(format!(
                        "Failed to open log file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
            tracing_appender::non_blocking(file)
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    // The numeric level is the only filter; RUST_LOG is not consulted.
    let filter = LevelFilter::from_level(config.level.tracing_level());

    let layer: Box<dyn Layer<Registry> + Send + Sync> = if config.level.is_pretty() {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_ansi(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_thread_names(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(writer)
            .with_filter(filter)
            .boxed()
    };

    let dispatch = Dispatch::new(tracing_subscriber::registry().with(layer));

    let guard = LoggingGuard {
        dispatch,
        _writer_guard: writer_guard,
    };

    let output = config
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    guard.in_scope(|| {
        tracing::debug!(level = %config.level, output = %output, "Logging initialized");
    });

    Ok(guard)
}
