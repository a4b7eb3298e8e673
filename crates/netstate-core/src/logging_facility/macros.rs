//! Operation boundary macros.
//!
//! Every macro stamps `component` (the calling module), `op` and `event`;
//! extra `key = value` fields are passed through to `tracing`.

/// Log the start of an operation
///
/// ```
/// # use netstate_core::log_op_start;
/// log_op_start!("evaluate_node");
/// log_op_start!("evaluate_category", category = "Routes IPv4");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use netstate_core::log_op_end;
/// log_op_end!("evaluate_category", duration_ms = 3, row_count = 4);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure
///
/// `$err` is anything convertible into `NsError`; its kind and stable code
/// are recorded as `err.kind` and `err.code`.
///
/// ```
/// # use netstate_core::{log_op_error, errors::NetStateError};
/// let err = NetStateError::KindMismatch { left: "sequence", right: "mapping" };
/// log_op_error!("states_match", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let ns_err: $crate::errors::NsError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ns_err.kind(),
            err.code = ns_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let ns_err: $crate::errors::NsError = $err.into();
        tracing::warn!(
            component = module_path!(),
            op = $op,
            event = $crate::netstate_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ns_err.kind(),
            err.code = ns_err.code(),
            $($field)*
        );
    }};
}
