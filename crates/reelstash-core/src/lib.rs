//! reelstash core - record model, error and logging facilities
//!
//! - `MovieRecord` / `ImageRecord` with an explicit last-write-wins merge rule
//! - Insert-vs-update planning under a configurable `UpsertPolicy`
//! - `RecordError` taxonomy with stable error codes
//! - Structured logging facility built on `tracing`

pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod schema;

pub use errors::{RecordError, RecordErrorKind, Result};
pub use model::{Details, ImageRecord, MovieRecord, StoredRow};
pub use ops::{UpsertPolicy, WritePlan, WriteReport};
