//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_CLASS_ID: &str = "class_id";
pub const FIELD_CLASS_NAME: &str = "class_name";
pub const FIELD_PATH: &str = "path";
pub const FIELD_SIDE: &str = "side";

// Collection sizes
pub const FIELD_DESCRIPTOR_COUNT: &str = "descriptor_count";
pub const FIELD_TREE_DIFF_COUNT: &str = "tree_diff_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
