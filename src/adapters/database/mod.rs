//! Database connection descriptors
//!
//! Turns validated [`DatabaseSettings`](crate::config::schema::DatabaseSettings)
//! into the connection string understood by the selected backend's driver.
//! Nothing here opens a connection.

pub mod factory;
pub mod traits;

pub use factory::{connection_string, formatter_for};
pub use traits::ConnectionFormat;
