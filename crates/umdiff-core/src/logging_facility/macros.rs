//! Operation logging macros
//!
//! Every engine operation logs a `start` event, then exactly one of `end`
//! or `end_error`. Extra `key = value` fields may follow the required ones.

/// Log the start of an operation
///
/// ```
/// # use umdiff_core::log_op_start;
/// log_op_start!("parse_manifest");
/// log_op_start!("parse_manifest", origin = "old.manifest");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::umdiff_core_types::schema::EVENT_START,
            $($($field)+)?
        )
    };
}

/// Log the successful end of an operation; `duration_ms` is required
///
/// ```
/// # use umdiff_core::log_op_end;
/// log_op_end!("parse_manifest", duration_ms = 3);
/// log_op_end!("parse_manifest", duration_ms = 3, entry_count = 812u64);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        ::tracing::info!(
            component = module_path!(),
            op = $op,
            event = $crate::umdiff_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($($field)+)?
        )
    };
}

/// Log a failed operation with the error's stable kind and code
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError),
/// normally a cloned `UmdiffError`.
///
/// ```
/// # use umdiff_core::{log_op_error, errors::UmdiffError};
/// let err = UmdiffError::SourceUnavailable {
///     reference: "missing.manifest".to_string(),
///     cause: "No such file or directory".to_string(),
/// };
/// log_op_error!("resolve_manifest", err, duration_ms = 1);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let failure: $crate::errors::ExError = ::core::convert::Into::into($err);
        ::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::umdiff_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err_kind = ?failure.kind(),
            err_code = failure.code(),
            $($($field)+)?
        )
    }};
}
