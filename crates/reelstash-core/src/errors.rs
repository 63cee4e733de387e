use std::sync::Arc;

/// Result type alias using RecordError
pub type Result<T> = std::result::Result<T, RecordError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the record cache is classified into one of
/// these kinds. Each kind maps to a stable error code that callers can match
/// on without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordErrorKind {
    /// Caller supplied a value the cache refuses to store (e.g. an empty id)
    InvalidInput,
    /// The embedded store rejected a query or commit
    Persistence,
    /// Filesystem failure around the store file
    Io,
    /// A stored column could not be encoded or decoded
    Serialization,
    /// The on-disk schema was written by a different schema definition
    SchemaMismatch,
    /// Stored bytes no longer match their recorded digest
    Corrupt,
    /// The session lock was poisoned by a panicking writer
    Concurrency,
    /// Store configuration could not be read or parsed
    Config,
}

impl RecordErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            RecordErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            RecordErrorKind::Persistence => "ERR_PERSISTENCE",
            RecordErrorKind::Io => "ERR_IO",
            RecordErrorKind::Serialization => "ERR_SERIALIZATION",
            RecordErrorKind::SchemaMismatch => "ERR_SCHEMA_MISMATCH",
            RecordErrorKind::Corrupt => "ERR_CORRUPT",
            RecordErrorKind::Concurrency => "ERR_CONCURRENCY",
            RecordErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a kind, the operation that failed, the record id involved (if
/// any), a human message, and the native error it wraps.
#[derive(Debug, Clone)]
pub struct RecordError {
    kind: RecordErrorKind,
    op: Option<String>,
    record_id: Option<String>,
    message: String,
    source: Option<Arc<dyn std::error::Error + Send + Sync + 'static>>,
}

impl RecordError {
    /// Create a new error with the specified kind
    pub fn new(kind: RecordErrorKind) -> Self {
        Self {
            kind,
            op: None,
            record_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add record ID context
    pub fn with_record_id(mut self, id: impl Into<String>) -> Self {
        self.record_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Wrap the native error that caused this one
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    pub fn kind(&self) -> RecordErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(record_id) = &self.record_id {
            write!(f, " (record_id: {})", record_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Reject ids the cache cannot key on
pub fn require_id(op: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(RecordError::new(RecordErrorKind::InvalidInput)
            .with_op(op)
            .with_message("record id must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(RecordErrorKind::Persistence.code(), "ERR_PERSISTENCE");
        assert_eq!(RecordErrorKind::SchemaMismatch.code(), "ERR_SCHEMA_MISMATCH");
        assert_eq!(RecordErrorKind::Corrupt.code(), "ERR_CORRUPT");
    }

    #[test]
    fn test_display_includes_context() {
        let err = RecordError::new(RecordErrorKind::Corrupt)
            .with_op("get_image")
            .with_record_id("tt0111161")
            .with_message("digest mismatch");

        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_CORRUPT] in operation 'get_image': digest mismatch (record_id: tt0111161)"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = RecordError::new(RecordErrorKind::Io).with_source(io);

        let source = err.source().expect("source should be set");
        assert_eq!(source.to_string(), "gone");
    }

    #[test]
    fn test_require_id_rejects_blank() {
        let err = require_id("save_movies", "  ").unwrap_err();
        assert_eq!(err.kind(), RecordErrorKind::InvalidInput);
        assert_eq!(err.op(), Some("save_movies"));
        assert!(require_id("save_movies", "tt1").is_ok());
    }
}
