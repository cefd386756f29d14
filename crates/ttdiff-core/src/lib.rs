//! ttdiff Core - type-tree dump parsing, canonicalization and diffing
//!
//! This crate provides the pure kernel of ttdiff, including:
//! - A position-tracking tokenizer and dump lexer
//! - The snapshot parser for the textual type-tree dump
//! - The canonicalizer that folds container idioms into generic types
//! - The snapshot and field-tree differ producing dual-sided diff trees
//! - Text renderers for panes, dump re-emission and class-id enums
//!
//! No file I/O happens here; callers hand in text, bytes or a reader.

pub mod canonical;
pub mod diff;
pub mod dump;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use canonical::{canonicalize_descriptor, canonicalize_field, canonicalize_snapshot};
pub use diff::{diff_snapshots, DiffOptions, DiffStatus, NodeDiff, Side, SnapshotDiff, TreeDiff};
pub use dump::{parse_snapshot_bytes, parse_snapshot_reader, parse_snapshot_str};
pub use errors::{DumpError, ExError, ExErrorKind, Result};
pub use model::{FieldNode, Snapshot, TypeDescriptor, Version};
