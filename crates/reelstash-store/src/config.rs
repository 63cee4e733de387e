//! Store configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! path = "/var/cache/app/reelstash.db"
//! journal_mode = "wal"
//! busy_timeout_ms = 5000
//! upsert_policy = "keyed"
//! ```

use reelstash_core::errors::{RecordError, RecordErrorKind};
use reelstash_core::UpsertPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default on-disk location, relative to the working directory
pub const DEFAULT_DB_PATH: &str = ".reelstash/store.db";

/// SQLite journal mode applied when the file is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
}

impl JournalMode {
    pub fn as_pragma(&self) -> &'static str {
        match self {
            JournalMode::Wal => "WAL",
            JournalMode::Delete => "DELETE",
        }
    }
}

/// Configuration for a file-backed LocalRecordStore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Database file; parent directories are created on open
    pub path: PathBuf,
    pub journal_mode: JournalMode,
    /// How long a write waits on a lock held by another connection
    pub busy_timeout_ms: u64,
    pub upsert_policy: UpsertPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
            journal_mode: JournalMode::default(),
            busy_timeout_ms: 5_000,
            upsert_policy: UpsertPolicy::default(),
        }
    }
}

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid store config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl From<ConfigError> for RecordError {
    fn from(err: ConfigError) -> Self {
        RecordError::new(RecordErrorKind::Config)
            .with_op("load_config")
            .with_message(err.to_string())
            .with_source(err)
    }
}

impl StoreConfig {
    /// Default settings with a custom database path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_upsert_policy(mut self, policy: UpsertPolicy) -> Self {
        self.upsert_policy = policy;
        self
    }

    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.upsert_policy, UpsertPolicy::Keyed);
    }

    #[test]
    fn test_full_toml() {
        let config = StoreConfig::from_toml_str(
            r#"
            path = "/tmp/movies.db"
            journal_mode = "delete"
            busy_timeout_ms = 250
            upsert_policy = "legacy"
            "#,
        )
        .unwrap();

        assert_eq!(config.path, PathBuf::from("/tmp/movies.db"));
        assert_eq!(config.journal_mode, JournalMode::Delete);
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
        assert_eq!(config.upsert_policy, UpsertPolicy::Legacy);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = StoreConfig::from_toml_str("eviction = \"lru\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(StoreConfig::from_toml_str("upsert_policy = \"positional\"").is_err());
    }

    #[test]
    fn test_missing_file_maps_to_config_kind() {
        let err: RecordError = StoreConfig::load("/definitely/not/here.toml")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), RecordErrorKind::Config);
    }
}
