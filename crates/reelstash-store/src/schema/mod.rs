//! Schema bootstrap
//!
//! The schema is embedded at compile time and applied once per database.
//! Its checksum is recorded so a file written by a different schema is
//! refused instead of silently misread. There is no upgrade path.

mod bootstrap;

pub use bootstrap::{ensure_schema, SCHEMA_ID};
