//! Configuration management for Strata.
//!
//! Startup configuration comes from three layered sources, resolved per
//! option with a fixed precedence: explicit command-line flag, then the
//! `{PREFIX}_{OPTION}` environment variable, then the compiled-in default.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strata::config::load_from_process;
//! use secrecy::ExposeSecret;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let startup = load_from_process()?;
//! startup.logging.install_global()?;
//!
//! println!("{}", startup.config.database.db_type);
//! let dsn = startup.config.database.connection.expose_secret();
//! # let _ = dsn;
//! # Ok(())
//! # }
//! ```
//!
//! # Options
//!
//! | Option           | Short | Default     |
//! |------------------|-------|-------------|
//! | `db-type`        | `-d`  | `mysql`     |
//! | `db-host`        | `-H`  | `localhost` |
//! | `db-password`    | `-p`  | `root`      |
//! | `db-port`        | `-P`  | backend default (3306 / 5432) |
//! | `db-tls`         | `-t`  | `preferred` |
//! | `db-user`        | `-u`  | `root`      |
//! | `db-schema`      | `-s`  | `test`      |
//! | `log-output`     | `-o`  | stdout      |
//! | `log-level`      | `-l`  | `0`         |
//! | `auth-domain`    | `-D`  | `test.com`  |
//! | `auth-client-id` | `-c`  | `test`      |
//! | `auth-secret`    | `-S`  | `test`      |
//!
//! # Environment Variables
//!
//! The prefix is the program name (or `test` for names longer than ten
//! characters), uppercased:
//!
//! ```bash
//! export STRATA_DB_TYPE=postgres
//! export STRATA_DB_PASSWORD="secret-password"
//! ```
//!
//! # Validation
//!
//! An unknown database type or TLS mode, an out-of-range log level, or an
//! unopenable log file aborts resolution with a [`StrataError`](crate::domain::StrataError).

pub mod loader;
pub mod options;
pub mod schema;
pub mod secret;
pub mod sources;

// Re-export commonly used types
pub use loader::{load_config, load_from_process, Startup};
pub use options::{OptionKind, OptionSpec, OPTIONS};
pub use schema::{
    AppConfig, AuthConfig, ConfigSummary, DatabaseConfig, DatabaseSettings, DbType, LogLevel,
    LoggingConfig, TlsMode,
};
pub use secret::{secret_string, SecretString, SecretValue};
pub use sources::{resolve, RawValue, RawValues, Sources, ValueSource};
