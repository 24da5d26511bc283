//! Backend-specific connection descriptors.
//!
//! - [`database`] - Formatter trait and the factory that picks a backend
//! - [`mysql`] - `user:password@tcp(host:port)/schema?...` DSNs
//! - [`postgresql`] - `host=... port=... ...` keyword/value strings
//!
//! ```rust
//! use strata::adapters::database::connection_string;
//! use strata::config::{secret_string, DatabaseSettings, DbType, TlsMode};
//! use secrecy::ExposeSecret;
//!
//! let settings = DatabaseSettings {
//!     db_type: DbType::Postgres,
//!     host: "localhost".to_string(),
//!     user: "root".to_string(),
//!     password: secret_string("root".to_string()),
//!     schema: "test".to_string(),
//!     port: "5432".to_string(),
//!     tls: TlsMode::Preferred,
//! };
//!
//! assert_eq!(
//!     connection_string(&settings).expose_secret(),
//!     "host=localhost port=5432 user=root password=root dbname=test sslmode=preferred"
//! );
//! ```

pub mod database;
pub mod mysql;
pub mod postgresql;
