// Strata - Layered startup configuration
// Copyright (c) 2025 Strata Contributors
// Licensed under the MIT License

//! # Strata - Layered startup configuration
//!
//! Strata resolves a service's runtime configuration from command-line
//! flags, environment variables and compiled-in defaults, then derives the
//! two artifacts every service needs at startup: a database connection
//! string and an initialized structured logger.
//!
//! ## Architecture
//!
//! - [`config`] - Option table, source resolution, typed configuration
//! - [`adapters`] - Connection-string synthesis for MySQL and PostgreSQL
//! - [`logging`] - Structured logging sink
//! - [`domain`] - Error and result types
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use strata::config::{load_config, Sources};
//! use secrecy::ExposeSecret;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let startup = load_config(&Sources::from_process())?;
//!     startup.logging.install_global()?;
//!
//!     tracing::info!(db_type = %startup.config.database.db_type, "Starting");
//!     let dsn = startup.config.database.connection.expose_secret();
//!     # let _ = dsn;
//!     Ok(())
//! }
//! ```
//!
//! ## Precedence
//!
//! For every option: explicit flag > `{PREFIX}_{OPTION}` environment
//! variable (when non-empty) > default.
//!
//! ```rust
//! use strata::config::{resolve, Sources, ValueSource, OPTIONS};
//!
//! # fn example() -> strata::domain::Result<()> {
//! let sources = Sources::new(["app", "-u", "flag-user"], [("APP_DB_USER", "env-user")]);
//! let raw = resolve(OPTIONS, &sources)?;
//! assert_eq!(raw.text("db-user")?, "flag-user");
//! assert_eq!(raw.source("db-user"), Some(ValueSource::Flag));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is a [`domain::StrataError`]. Invalid values never produce
//! a partially built configuration:
//!
//! ```rust
//! use strata::config::{load_config, Sources};
//! use strata::domain::StrataError;
//!
//! let result = load_config(&Sources::new(["app", "--db-type", "sqlite"], [("", ""); 0]));
//! assert!(matches!(result, Err(StrataError::Validation(_))));
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod logging;
