//! Configuration schema types
//!
//! Typed sub-configurations built from [`RawValues`]. Construction is where
//! field constraints are enforced: an invalid database type or TLS mode, or
//! an out-of-range log level, never makes it into one of these values.

use super::options::{
    AUTH_CLIENT_ID, AUTH_DOMAIN, AUTH_SECRET, DB_HOST, DB_PASSWORD, DB_PORT, DB_SCHEMA, DB_TLS,
    DB_TYPE, DB_USER, LOG_LEVEL, LOG_OUTPUT,
};
use super::secret::{secret_string, SecretString};
use super::sources::RawValues;
use crate::adapters::database::connection_string;
use crate::domain::{Result, StrataError};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

/// Supported database backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DbType {
    /// MySQL / MariaDB
    MySql,
    /// PostgreSQL
    Postgres,
}

impl DbType {
    /// Canonical port for the backend
    pub fn default_port(&self) -> &'static str {
        match self {
            DbType::MySql => "3306",
            DbType::Postgres => "5432",
        }
    }

    /// Name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DbType::MySql => "mysql",
            DbType::Postgres => "postgres",
        }
    }
}

impl FromStr for DbType {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mysql" => Ok(DbType::MySql),
            "postgres" => Ok(DbType::Postgres),
            other => Err(StrataError::Validation(format!(
                "db-type not set to valid value '{other}'. Must be one of: mysql, postgres"
            ))),
        }
    }
}

impl fmt::Display for DbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport security preference handed to the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// TLS required
    True,
    /// TLS disabled
    False,
    /// TLS used when the server offers it
    Preferred,
}

impl TlsMode {
    /// Value as written into the connection string
    pub fn as_str(&self) -> &'static str {
        match self {
            TlsMode::True => "true",
            TlsMode::False => "false",
            TlsMode::Preferred => "preferred",
        }
    }
}

impl FromStr for TlsMode {
    type Err = StrataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "true" => Ok(TlsMode::True),
            "false" => Ok(TlsMode::False),
            "preferred" => Ok(TlsMode::Preferred),
            other => Err(StrataError::Validation(format!(
                "invalid tls configuration '{other}'. Must be one of: true, false, preferred"
            ))),
        }
    }
}

impl fmt::Display for TlsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated database fields, the input to connection-string synthesis
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    /// Backend type
    pub db_type: DbType,
    /// Server host
    pub host: String,
    /// Login user
    pub user: String,
    /// Login password
    pub password: SecretString,
    /// Database / schema name
    pub schema: String,
    /// Server port; the backend default when none was supplied
    pub port: String,
    /// TLS mode
    pub tls: TlsMode,
}

impl DatabaseSettings {
    /// Validate and normalize the database options
    ///
    /// Checks run in a fixed order: database type, then port defaulting for
    /// that type, then TLS mode.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Validation`] for an unknown database type or
    /// TLS mode.
    pub fn from_raw(raw: &RawValues) -> Result<Self> {
        let db_type: DbType = raw.text(DB_TYPE)?.parse()?;

        let port = match raw.text(DB_PORT)? {
            "" => db_type.default_port().to_string(),
            explicit => explicit.to_string(),
        };

        let tls: TlsMode = raw.text(DB_TLS)?.parse()?;

        Ok(Self {
            db_type,
            host: raw.text(DB_HOST)?.to_string(),
            user: raw.text(DB_USER)?.to_string(),
            password: secret_string(raw.text(DB_PASSWORD)?.to_string()),
            schema: raw.text(DB_SCHEMA)?.to_string(),
            port,
            tls,
        })
    }
}

/// Database configuration handed to the application
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Backend type
    pub db_type: DbType,
    /// Backend-specific connection string
    /// Embeds the password, so it is held as a secret
    pub connection: SecretString,
}

impl DatabaseConfig {
    /// Synthesize the connection string for validated settings
    pub fn from_settings(settings: &DatabaseSettings) -> Self {
        Self {
            db_type: settings.db_type,
            connection: connection_string(settings),
        }
    }
}

/// Log verbosity, 0 (debug, pretty output) through 4 (fatal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LogLevel(u8);

impl LogLevel {
    /// Most verbose level
    pub const DEBUG: LogLevel = LogLevel(0);
    /// Least verbose level
    pub const FATAL: LogLevel = LogLevel(4);

    /// Numeric value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Level 0 renders human-readable, colorized output
    pub fn is_pretty(&self) -> bool {
        self.0 == 0
    }

    /// Threshold for the tracing subscriber
    ///
    /// tracing has no fatal level, so 4 maps to ERROR like 3 does.
    pub fn tracing_level(&self) -> Level {
        match self.0 {
            0 => Level::DEBUG,
            1 => Level::INFO,
            2 => Level::WARN,
            _ => Level::ERROR,
        }
    }
}

impl TryFrom<i64> for LogLevel {
    type Error = StrataError;

    fn try_from(value: i64) -> Result<Self> {
        match u8::try_from(value) {
            Ok(level) if level <= Self::FATAL.0 => Ok(LogLevel(level)),
            _ => Err(StrataError::Validation(format!(
                "log-level must be between 0 and 4, got {value}"
            ))),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Verbosity
    pub level: LogLevel,
    /// Log file, opened for append; `None` writes to stdout
    pub output: Option<PathBuf>,
}

impl LoggingConfig {
    /// Build the logging configuration from resolved values
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::Validation`] if the level is outside 0-4.
    pub fn from_raw(raw: &RawValues) -> Result<Self> {
        let level = LogLevel::try_from(raw.integer(LOG_LEVEL)?)?;
        let output = match raw.text(LOG_OUTPUT)? {
            "" => None,
            path => Some(PathBuf::from(path)),
        };
        Ok(Self { level, output })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::DEBUG,
            output: None,
        }
    }
}

/// Authentication backend settings, passed through unchanged
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Authentication domain
    pub domain: String,
    /// Client id
    pub client_id: String,
    /// Client secret
    pub secret: SecretString,
}

impl AuthConfig {
    /// Copy the auth options out of the resolved values
    pub fn from_raw(raw: &RawValues) -> Result<Self> {
        Ok(Self {
            domain: raw.text(AUTH_DOMAIN)?.to_string(),
            client_id: raw.text(AUTH_CLIENT_ID)?.to_string(),
            secret: secret_string(raw.text(AUTH_SECRET)?.to_string()),
        })
    }
}

/// Fully resolved application configuration
///
/// Constructed once at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database type and connection string
    pub database: DatabaseConfig,
    /// Log level the logger was initialized with
    pub log_level: LogLevel,
    /// Authentication settings
    pub auth: AuthConfig,
}

impl AppConfig {
    /// A serializable view with every credential redacted
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            db_type: self.database.db_type,
            db_connection: REDACTED,
            log_level: self.log_level,
            auth_domain: self.auth.domain.clone(),
            auth_client_id: self.auth.client_id.clone(),
            auth_secret: REDACTED,
        }
    }
}

const REDACTED: &str = "[REDACTED]";

/// Redacted configuration view for printing
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    /// Database type
    pub db_type: DbType,
    /// Always redacted
    pub db_connection: &'static str,
    /// Log level
    pub log_level: LogLevel,
    /// Authentication domain
    pub auth_domain: String,
    /// Client id
    pub auth_client_id: String,
    /// Always redacted
    pub auth_secret: &'static str,
}
