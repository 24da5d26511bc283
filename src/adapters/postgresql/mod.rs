//! PostgreSQL connection descriptors
//!
//! Produces keyword/value connection strings as accepted by libpq and
//! libpq-compatible drivers.

pub mod conninfo;

pub use conninfo::{format_conninfo, PostgresConnInfo};
