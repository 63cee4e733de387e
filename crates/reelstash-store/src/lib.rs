//! reelstash store - SQLite-backed record cache
//!
//! Provides:
//! - `LocalRecordStore`, the movie list and poster cache session
//! - TOML store configuration
//! - Embedded schema bootstrap with checksum verification
//! - Row-level repositories for the movies and images tables

pub mod config;
pub mod db;
pub mod digest;
pub mod errors;
pub mod record_store;
pub mod repo;
pub mod schema;

pub use config::{ConfigError, JournalMode, StoreConfig};
pub use errors::Result;
pub use record_store::LocalRecordStore;
