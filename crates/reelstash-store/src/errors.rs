//! Error helpers for reelstash-store
//!
//! Wraps native store errors into reelstash-core's RecordError

use reelstash_core::errors::{RecordError, RecordErrorKind};

/// Result type alias using RecordError
pub type Result<T> = std::result::Result<T, RecordError>;

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(operation: &str, err: rusqlite::Error) -> RecordError {
    RecordError::new(RecordErrorKind::Persistence)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_source(err)
}

/// Create a serialization error for a stored column
pub fn from_serde_json(operation: &str, err: serde_json::Error) -> RecordError {
    RecordError::new(RecordErrorKind::Serialization)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_source(err)
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> RecordError {
    RecordError::new(RecordErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
        .with_source(err)
}

/// Create a schema mismatch error
pub fn schema_mismatch(schema_id: &str, expected: &str, actual: &str) -> RecordError {
    RecordError::new(RecordErrorKind::SchemaMismatch)
        .with_op("schema_bootstrap")
        .with_message(format!(
            "Checksum mismatch for schema {}: expected {}, found {}",
            schema_id, expected, actual
        ))
}

/// Create a schema bootstrap failure
pub fn schema_error(schema_id: &str, reason: &str) -> RecordError {
    RecordError::new(RecordErrorKind::Persistence)
        .with_op("schema_bootstrap")
        .with_message(format!("Schema {} failed to apply: {}", schema_id, reason))
}

/// Create a corrupt blob error
pub fn corrupt_blob(record_id: &str, expected: &str, actual: &str) -> RecordError {
    RecordError::new(RecordErrorKind::Corrupt)
        .with_op("image_read")
        .with_record_id(record_id)
        .with_message(format!(
            "Image digest mismatch: recorded {}, computed {}",
            expected, actual
        ))
}

/// Create an error for a session lock poisoned by a panicking holder
pub fn poisoned(operation: &str) -> RecordError {
    RecordError::new(RecordErrorKind::Concurrency)
        .with_op(operation.to_string())
        .with_message("store session mutex poisoned")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rusqlite_keeps_operation() {
        let err = from_rusqlite("movie_insert", rusqlite::Error::QueryReturnedNoRows);

        assert_eq!(err.kind(), RecordErrorKind::Persistence);
        assert_eq!(err.op(), Some("movie_insert"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
