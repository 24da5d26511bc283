//! MySQL connection descriptors
//!
//! Produces DSNs in the `user:password@tcp(host:port)/dbname?params` grammar
//! used by the Go MySQL driver and tools that share its format.

pub mod dsn;

pub use dsn::{format_dsn, MySqlDsn};
