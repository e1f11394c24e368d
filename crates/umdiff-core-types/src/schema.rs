//! Canonical schema constants for structured logging and events
//!
//! These constants keep log field names identical across the resolver, the
//! parser, the diff engine and the CLI. `tracing` macros take field names as
//! bare identifiers, so emit sites spell them out; readers (the test capture
//! layer and log assertions) go through these constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Manifest identifiers
pub const FIELD_REFERENCE: &str = "reference";
pub const FIELD_ORIGIN: &str = "origin";

// Collection sizes
pub const FIELD_ENTRY_COUNT: &str = "entry_count";
pub const FIELD_BYTES: &str = "bytes";
pub const FIELD_ARCH_COUNT: &str = "arch_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
