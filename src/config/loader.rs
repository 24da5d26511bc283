//! Top-level configuration assembly
//!
//! Runs the whole startup pipeline once:
//!
//! 1. Resolve every option from flags, environment and defaults
//! 2. Validate the database settings (type, port default, TLS mode)
//! 3. Build the logging and auth sections
//! 4. Initialize the logging sink
//! 5. Synthesize the connection string and assemble [`AppConfig`]
//!
//! All pure validation happens before the log file is touched. The first
//! error aborts the pipeline; a configuration is either returned complete
//! or not at all.

use super::options::OPTIONS;
use super::schema::{AppConfig, AuthConfig, DatabaseConfig, DatabaseSettings, LoggingConfig};
use super::sources::{resolve, Sources};
use crate::domain::Result;
use crate::log_option_resolved;
use crate::logging::{init_logging, LoggingGuard};

/// Result of a successful startup resolution
#[derive(Debug)]
pub struct Startup {
    /// Resolved configuration
    pub config: AppConfig,
    /// Logging sink built from the configuration; keep it alive
    pub logging: LoggingGuard,
}

/// Resolve and validate the configuration, then initialize logging
///
/// # Errors
///
/// Returns an error if:
/// - The command line is malformed or requests `--help`/`--version`
/// - An environment value cannot be parsed
/// - The database type, TLS mode or log level is invalid
/// - The log file cannot be opened
///
/// # Examples
///
/// ```no_run
/// use strata::config::{load_config, Sources};
/// use secrecy::ExposeSecret;
///
/// let startup = load_config(&Sources::new(["app", "-d", "postgres"], [("APP_DB_HOST", "db")]))
///     .expect("invalid configuration");
/// println!("{}", startup.config.database.connection.expose_secret());
/// ```
pub fn load_config(sources: &Sources) -> Result<Startup> {
    let raw = resolve(OPTIONS, sources)?;

    let settings = DatabaseSettings::from_raw(&raw)?;
    let logging_config = LoggingConfig::from_raw(&raw)?;
    let auth = AuthConfig::from_raw(&raw)?;

    let logging = init_logging(&logging_config)?;

    let config = logging.in_scope(|| {
        for (name, resolved) in raw.iter() {
            let secret = super::options::find(name).is_some_and(|opt| opt.secret);
            log_option_resolved!(name, resolved.value, resolved.source, secret);
        }

        let config = AppConfig {
            database: DatabaseConfig::from_settings(&settings),
            log_level: logging_config.level,
            auth,
        };

        tracing::info!(
            env_prefix = sources.prefix(),
            db_type = %config.database.db_type,
            log_level = %config.log_level,
            "Configuration loaded"
        );
        config
    });

    Ok(Startup { config, logging })
}

/// Resolve the configuration from the current process argv and environment
///
/// # Errors
///
/// See [`load_config`].
pub fn load_from_process() -> Result<Startup> {
    load_config(&Sources::from_process())
}
