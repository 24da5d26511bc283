//! Declarative option table
//!
//! Every configuration field is registered here once, with its canonical
//! kebab-case name, short flag, compiled-in default and help text. The
//! resolver, the flag parser and the environment lookup are all driven
//! from [`OPTIONS`].

/// Database backend (`mysql` or `postgres`)
pub const DB_TYPE: &str = "db-type";
/// Database host
pub const DB_HOST: &str = "db-host";
/// Database password
pub const DB_PASSWORD: &str = "db-password";
/// Database port, empty selects the backend default
pub const DB_PORT: &str = "db-port";
/// Database TLS mode (`true`, `false`, `preferred`)
pub const DB_TLS: &str = "db-tls";
/// Database user
pub const DB_USER: &str = "db-user";
/// Database schema
pub const DB_SCHEMA: &str = "db-schema";
/// Log file path, empty selects stdout
pub const LOG_OUTPUT: &str = "log-output";
/// Log level 0-4
pub const LOG_LEVEL: &str = "log-level";
/// Authentication domain
pub const AUTH_DOMAIN: &str = "auth-domain";
/// Authentication client id
pub const AUTH_CLIENT_ID: &str = "auth-client-id";
/// Authentication secret
pub const AUTH_SECRET: &str = "auth-secret";

/// Value type of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Free-form string
    Text,
    /// Signed integer
    Integer,
}

/// A registered configuration option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Canonical kebab-case name, also the long flag
    pub name: &'static str,
    /// Short flag alias
    pub short: char,
    /// Value type
    pub kind: OptionKind,
    /// Compiled-in default, parsed according to `kind`
    pub default: &'static str,
    /// Help text shown by `--help`
    pub help: &'static str,
    /// Value must never be logged
    pub secret: bool,
}

impl OptionSpec {
    const fn text(
        name: &'static str,
        short: char,
        default: &'static str,
        help: &'static str,
    ) -> Self {
        Self {
            name,
            short,
            kind: OptionKind::Text,
            default,
            help,
            secret: false,
        }
    }

    const fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// Environment variable consulted for this option under `prefix`
    pub fn env_key(&self, prefix: &str) -> String {
        env_key(prefix, self.name)
    }
}

/// All options, in flag registration order
pub const OPTIONS: &[OptionSpec] = &[
    OptionSpec::text(
        DB_TYPE,
        'd',
        "mysql",
        "type of database to use for db connection string, mysql and postgres acceptable",
    ),
    OptionSpec::text(DB_HOST, 'H', "localhost", "host for database"),
    OptionSpec::text(DB_PASSWORD, 'p', "root", "password for database").secret(),
    OptionSpec::text(
        DB_PORT,
        'P',
        "",
        "port for database, uses default appropriate for db type if not set",
    ),
    OptionSpec::text(
        DB_TLS,
        't',
        "preferred",
        "configuration to use for db tls connection. Options are true, false and preferred",
    ),
    OptionSpec::text(DB_USER, 'u', "root", "user for database"),
    OptionSpec::text(DB_SCHEMA, 's', "test", "schema for database"),
    OptionSpec::text(
        LOG_OUTPUT,
        'o',
        "",
        "file to write logs to. No value writes to stdout",
    ),
    OptionSpec {
        name: LOG_LEVEL,
        short: 'l',
        kind: OptionKind::Integer,
        default: "0",
        help: "log level 0-4, 0 being debug with pretty output, 4 being fatal",
        secret: false,
    },
    OptionSpec::text(
        AUTH_DOMAIN,
        'D',
        "test.com",
        "domain to use for authentication backend",
    ),
    OptionSpec::text(
        AUTH_CLIENT_ID,
        'c',
        "test",
        "client-id to use for authentication backend",
    ),
    OptionSpec::text(
        AUTH_SECRET,
        'S',
        "test",
        "secret to use for authentication backend",
    )
    .secret(),
];

/// Look up an option by canonical name
pub fn find(name: &str) -> Option<&'static OptionSpec> {
    OPTIONS.iter().find(|opt| opt.name == name)
}

/// Build the environment variable name for an option
///
/// The prefix is uppercased and joined with the upper-snake form of the
/// canonical name: `("test", "db-host")` becomes `TEST_DB_HOST`.
pub fn env_key(prefix: &str, name: &str) -> String {
    let key = name.to_uppercase().replace('-', "_");
    if prefix.is_empty() {
        return key;
    }
    format!("{}_{}", prefix.to_uppercase().replace('-', "_"), key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_has_twelve_unique_options() {
        assert_eq!(OPTIONS.len(), 12);

        let names: HashSet<_> = OPTIONS.iter().map(|o| o.name).collect();
        assert_eq!(names.len(), OPTIONS.len());

        let shorts: HashSet<_> = OPTIONS.iter().map(|o| o.short).collect();
        assert_eq!(shorts.len(), OPTIONS.len());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(find(DB_TYPE).unwrap().default, "mysql");
        assert_eq!(find(DB_PORT).unwrap().default, "");
        assert_eq!(find(DB_TLS).unwrap().default, "preferred");
        assert_eq!(find(LOG_LEVEL).unwrap().default, "0");
        assert_eq!(find(LOG_LEVEL).unwrap().kind, OptionKind::Integer);
        assert_eq!(find(AUTH_DOMAIN).unwrap().default, "test.com");
    }

    #[test]
    fn test_secret_options() {
        let secrets: Vec<_> = OPTIONS.iter().filter(|o| o.secret).map(|o| o.name).collect();
        assert_eq!(secrets, vec![DB_PASSWORD, AUTH_SECRET]);
    }

    #[test]
    fn test_env_key() {
        assert_eq!(env_key("test", "db-host"), "TEST_DB_HOST");
        assert_eq!(env_key("TEST", "auth-client-id"), "TEST_AUTH_CLIENT_ID");
        assert_eq!(env_key("my-app", "log-level"), "MY_APP_LOG_LEVEL");
        assert_eq!(env_key("", "db-tls"), "DB_TLS");
    }

    #[test]
    fn test_find_unknown() {
        assert!(find("db-nope").is_none());
    }
}
