//! PostgreSQL key=value connection string synthesis

use crate::adapters::database::traits::ConnectionFormat;
use crate::config::schema::DatabaseSettings;
use secrecy::ExposeSecret;

/// Formatter for PostgreSQL keyword/value connection strings
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresConnInfo;

impl ConnectionFormat for PostgresConnInfo {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    fn format(&self, settings: &DatabaseSettings) -> String {
        format_conninfo(settings)
    }
}

/// Render a PostgreSQL connection string
///
/// ```text
/// host={host} port={port} user={user} password={password} dbname={schema} sslmode={tls}
/// ```
///
/// Pairs are separated by a single space and values are inserted verbatim.
pub fn format_conninfo(settings: &DatabaseSettings) -> String {
    format!(
        "host={} port={} user={} password={} dbname={} sslmode={}",
        settings.host,
        settings.port,
        settings.user,
        settings.password.expose_secret(),
        settings.schema,
        settings.tls,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DbType, TlsMode};
    use crate::config::secret::secret_string;

    fn settings(password: &str, tls: TlsMode) -> DatabaseSettings {
        DatabaseSettings {
            db_type: DbType::Postgres,
            host: "pg.internal".to_string(),
            user: "svc".to_string(),
            password: secret_string(password.to_string()),
            schema: "orders".to_string(),
            port: "6432".to_string(),
            tls,
        }
    }

    #[test]
    fn test_format_conninfo() {
        assert_eq!(
            format_conninfo(&settings("pw", TlsMode::True)),
            "host=pg.internal port=6432 user=svc password=pw dbname=orders sslmode=true"
        );
    }

    #[test]
    fn test_values_are_not_escaped() {
        let conninfo = format_conninfo(&settings("it's a pw", TlsMode::False));
        assert!(conninfo.contains("password=it's a pw dbname=orders"));
        assert!(conninfo.ends_with("sslmode=false"));
    }

    #[test]
    fn test_single_space_between_pairs() {
        let conninfo = format_conninfo(&settings("pw", TlsMode::Preferred));
        assert_eq!(conninfo.split(' ').count(), 6);
        assert!(!conninfo.contains("  "));
    }

    #[test]
    fn test_trait_delegates() {
        let s = settings("pw", TlsMode::True);
        assert_eq!(PostgresConnInfo.format(&s), format_conninfo(&s));
        assert_eq!(PostgresConnInfo.backend(), "postgres");
    }
}
