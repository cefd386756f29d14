//! Core types shared across ttdiff facilities
//!
//! This crate provides foundational types used by both error handling
//! and logging facilities:
//!
//! - **Source positions**: `SourcePosition` (1-based line and column)
//! - **Schema constants**: Canonical field keys and event names

pub mod position;
pub mod schema;

pub use position::SourcePosition;
