//! Connection-string factory
//!
//! Picks the formatter matching the validated database type.

use crate::adapters::database::traits::ConnectionFormat;
use crate::adapters::mysql::MySqlDsn;
use crate::adapters::postgresql::PostgresConnInfo;
use crate::config::schema::{DatabaseSettings, DbType};
use crate::config::secret::{secret_string, SecretString};

/// Get the formatter for a database type
pub fn formatter_for(db_type: DbType) -> &'static dyn ConnectionFormat {
    match db_type {
        DbType::MySql => &MySqlDsn,
        DbType::Postgres => &PostgresConnInfo,
    }
}

/// Synthesize the connection string for validated settings
///
/// The result embeds the password and is returned as a secret.
pub fn connection_string(settings: &DatabaseSettings) -> SecretString {
    let formatter = formatter_for(settings.db_type);
    tracing::debug!(
        backend = formatter.backend(),
        host = %settings.host,
        port = %settings.port,
        tls = %settings.tls,
        "Building database connection string"
    );
    secret_string(formatter.format(settings))
}
