//! Error handling for ttdiff-engine
//!
//! Wraps ttdiff-core ExError with engine-specific helpers

use std::path::Path;

use ttdiff_core::errors::{DumpError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error for a file operation
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation)
        .with_message(format!("{}: {}", path.display(), err))
}

/// Create a configuration error
pub fn config_error(path: Option<&Path>, reason: &str) -> ExError {
    let message = match path {
        Some(path) => format!("Invalid config {}: {}", path.display(), reason),
        None => format!("Invalid config: {}", reason),
    };
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("config_load")
        .with_message(message)
}

/// Create an error for a class id absent from the loaded snapshots
pub fn class_not_found(class_id: i32) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("class_diff")
        .with_class_id(class_id)
        .with_message(format!("Class {} not found", class_id))
}

/// Attach operation context to a core error
pub fn from_dump(operation: &str, err: DumpError) -> ExError {
    ExError::from(err).with_op(operation)
}
