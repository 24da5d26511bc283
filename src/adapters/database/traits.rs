//! Connection-string formatting trait
//!
//! Each supported backend implements [`ConnectionFormat`] with its own
//! descriptor grammar.

use crate::config::schema::DatabaseSettings;

/// Renders validated database settings as a backend connection descriptor
pub trait ConnectionFormat: Send + Sync {
    /// Short backend name, for logs
    fn backend(&self) -> &'static str;

    /// Render the connection descriptor
    ///
    /// Settings are already validated, so formatting cannot fail.
    fn format(&self, settings: &DatabaseSettings) -> String;
}
