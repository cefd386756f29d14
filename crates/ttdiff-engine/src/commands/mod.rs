//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate file access,
//! parsing, canonicalization and diffing.

pub mod compare;
pub mod engine_command;
pub mod load;
