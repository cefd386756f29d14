//! Snapshot and field-tree diff engine.
//!
//! Compares two canonical snapshots and produces a dual-sided diff suitable
//! for side-by-side rendering.
//!
//! ## Entry point
//!
//! ```ignore
//! use ttdiff_core::diff::{diff_snapshots, DiffOptions};
//!
//! let diff = diff_snapshots(&left, &right, &DiffOptions::default())?;
//! let summary = ttdiff_core::diff::human_summary::render_human_summary(&diff);
//! ```
//!
//! ## Guarantees
//!
//! - **Order**: left classes first in left order, then right-only classes in
//!   right order.
//! - **Row alignment**: every [`NodeDiff`] has child lists of equal length and
//!   renders the same number of rows in both panes.
//! - **Greedy alignment**: sibling fields are paired by name with a
//!   right-biased forward scan; simultaneous reorders on both sides show up as
//!   delete/add pairs.

pub mod engine;
pub mod human_summary;
pub mod model;
pub mod node;

pub use engine::{build_tree_diff, diff_snapshots, ClassPair, DiffOptions};
pub use human_summary::render_human_summary;
pub use model::{DiffStatus, DiffSummary, NodeDiff, Side, SnapshotDiff, TreeDiff};
pub use node::{build_node_diff, NodePair};
