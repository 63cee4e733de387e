//! Canonical schema constants for structured logging
//!
//! These constants keep field keys and event names consistent across the
//! logging macros, the store, and test assertions.

// Canonical field keys for structured logging. The macros spell these as
// identifiers; captured events are looked up by these names.
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RECORD_ID: &str = "record_id";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
