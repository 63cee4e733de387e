//! Canonical logging macros
//!
//! Every store operation logs exactly one start event and one end (or
//! end_error) event through these macros.

/// Log the start of an operation
///
/// ```
/// # use reelstash_core::log_op_start;
/// log_op_start!("get_movies");
/// log_op_start!("save_image", record_id = "tt0111161");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use reelstash_core::log_op_end;
/// log_op_end!("get_movies", duration_ms = 3);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation error
///
/// `$err` must be a `RecordError` (or a reference to one).
///
/// ```
/// # use reelstash_core::log_op_error;
/// # use reelstash_core::errors::{RecordError, RecordErrorKind};
/// let err = RecordError::new(RecordErrorKind::Persistence);
/// log_op_error!("save_movies", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let record_err: &$crate::errors::RecordError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?record_err.kind(),
            err_code = record_err.code(),
            err_message = %record_err,
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let record_err: &$crate::errors::RecordError = &$err;
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?record_err.kind(),
            err_code = record_err.code(),
            err_message = %record_err,
            $($field)*
        );
    }};
}
