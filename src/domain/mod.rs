//! Domain types shared across Strata.
//!
//! - **Error types** ([`StrataError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations return [`Result<T, StrataError>`]:
//!
//! ```rust
//! use strata::domain::{Result, StrataError};
//!
//! fn parse_port(value: &str) -> Result<u16> {
//!     value
//!         .parse()
//!         .map_err(|_| StrataError::Validation(format!("invalid port '{value}'")))
//! }
//! ```

pub mod errors;
pub mod result;

pub use errors::StrataError;
pub use result::Result;
