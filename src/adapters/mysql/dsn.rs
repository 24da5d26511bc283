//! MySQL DSN synthesis

use crate::adapters::database::traits::ConnectionFormat;
use crate::config::schema::DatabaseSettings;
use secrecy::ExposeSecret;

/// Formatter for MySQL DSNs
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlDsn;

impl ConnectionFormat for MySqlDsn {
    fn backend(&self) -> &'static str {
        "mysql"
    }

    fn format(&self, settings: &DatabaseSettings) -> String {
        format_dsn(settings)
    }
}

/// Render a MySQL DSN
///
/// ```text
/// [{user}[:{password}]@]tcp({host}:{port})/{schema}?parseTime=true&tls={tls}&charset=utf8
/// ```
///
/// Consumers compare the query string positionally, so the parameter order
/// is fixed: `parseTime`, `tls`, `charset`. The credential block is left out
/// when the user is empty, and `:{password}` is left out when the password
/// is empty. User, password and host are written verbatim since the DSN
/// parser splits credentials at the last `@`. The schema is path-escaped.
pub fn format_dsn(settings: &DatabaseSettings) -> String {
    let mut dsn = String::new();

    if !settings.user.is_empty() {
        dsn.push_str(&settings.user);
        let password = settings.password.expose_secret();
        if !password.is_empty() {
            dsn.push(':');
            dsn.push_str(password.as_str());
        }
        dsn.push('@');
    }

    dsn.push_str(&format!(
        "tcp({host}:{port})/{schema}?parseTime=true&tls={tls}&charset=utf8",
        host = settings.host,
        port = settings.port,
        schema = escape_path_segment(&settings.schema),
        tls = settings.tls,
    ));
    dsn
}

/// Percent-encode a single path segment
///
/// Unreserved characters and `$ & + : = @` stay as they are; every other
/// byte, including `/`, `?`, `;` and `,`, becomes `%XX`.
fn escape_path_segment(segment: &str) -> String {
    let mut escaped = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'~'
            | b'$'
            | b'&'
            | b'+'
            | b':'
            | b'='
            | b'@' => escaped.push(char::from(byte)),
            _ => escaped.push_str(&format!("%{byte:02X}")),
        }
    }
    escaped
}
