//! Diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq`.
//! Child lists are `Arc<[NodeDiff]>` so the left and right views of a node can
//! share one allocation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::model::Version;

/// Per-node and per-class change classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiffStatus {
    Unchanged,
    Changed,
    Added,
    Deleted,
    /// At least one side could not produce a field tree
    Invalid,
}

impl DiffStatus {
    pub const ALL: [DiffStatus; 5] = [
        DiffStatus::Unchanged,
        DiffStatus::Changed,
        DiffStatus::Added,
        DiffStatus::Deleted,
        DiffStatus::Invalid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DiffStatus::Unchanged => "Unchanged",
            DiffStatus::Changed => "Changed",
            DiffStatus::Added => "Added",
            DiffStatus::Deleted => "Deleted",
            DiffStatus::Invalid => "Invalid",
        }
    }
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One of the two panes of a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Field-level diff with independently walkable left and right views
///
/// An empty type on one side marks a ghost row: the field does not exist in
/// that pane but still occupies a row so both panes stay aligned. Both child
/// lists always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDiff {
    pub name: String,
    pub left_type: String,
    pub right_type: String,
    pub left_align: bool,
    pub right_align: bool,
    pub status: DiffStatus,
    pub left_children: Arc<[NodeDiff]>,
    pub right_children: Arc<[NodeDiff]>,
}

impl NodeDiff {
    pub fn type_on(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_type,
            Side::Right => &self.right_type,
        }
    }

    pub fn align_on(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left_align,
            Side::Right => self.right_align,
        }
    }

    pub fn children_on(&self, side: Side) -> &[NodeDiff] {
        match side {
            Side::Left => &self.left_children,
            Side::Right => &self.right_children,
        }
    }

    /// Whether this node is a placeholder on `side`
    pub fn is_ghost(&self, side: Side) -> bool {
        self.type_on(side).is_empty()
    }

    /// Rows this subtree occupies in the pane for `side`
    pub fn row_count(&self, side: Side) -> usize {
        1 + self
            .children_on(side)
            .iter()
            .map(|c| c.row_count(side))
            .sum::<usize>()
    }

    /// Depth-first walk over every node reachable from either view
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NodeDiff)) {
        visit(self);
        for child in self.left_children.iter() {
            child.walk(visit);
        }
        if !Arc::ptr_eq(&self.left_children, &self.right_children) {
            for child in self.right_children.iter() {
                child.walk(visit);
            }
        }
    }
}

impl fmt::Display for NodeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.left_type == self.right_type {
            write!(f, "{} {}", self.right_type, self.name)
        } else {
            write!(f, "{}({}) {}", self.right_type, self.left_type, self.name)
        }
    }
}

/// Class-level diff for one class id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeDiff {
    pub class_id: i32,
    pub left_name: String,
    pub right_name: String,
    /// Direct base name, empty for a root class
    pub left_base_name: String,
    pub right_base_name: String,
    /// Full ancestor chains, nearest first
    pub left_inheritance: Vec<String>,
    pub right_inheritance: Vec<String>,
    pub status: DiffStatus,
    /// Field tree diff; absent for abstract or invalid classes
    pub node: Option<NodeDiff>,
}

impl TreeDiff {
    pub fn name_on(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_name,
            Side::Right => &self.right_name,
        }
    }

    pub fn base_name_on(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left_base_name,
            Side::Right => &self.right_base_name,
        }
    }

    pub fn inheritance_on(&self, side: Side) -> &[String] {
        match side {
            Side::Left => &self.left_inheritance,
            Side::Right => &self.right_inheritance,
        }
    }

    /// Whether class and base names agree across sides
    pub fn names_match(&self) -> bool {
        self.left_name == self.right_name && self.left_base_name == self.right_base_name
    }

    /// Whether the class exists in the snapshot for `side`
    pub fn is_present_on(&self, side: Side) -> bool {
        !matches!(
            (self.status, side),
            (DiffStatus::Added, Side::Left) | (DiffStatus::Deleted, Side::Right)
        )
    }

    /// `Class <= Base <= Root` for one side
    pub fn hierarchy(&self, side: Side) -> String {
        std::iter::once(self.name_on(side))
            .chain(self.inheritance_on(side).iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" <= ")
    }
}

/// Per-status class counts of a snapshot diff
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub unchanged: usize,
    pub changed: usize,
    pub added: usize,
    pub deleted: usize,
    pub invalid: usize,
}

impl DiffSummary {
    pub fn get(&self, status: DiffStatus) -> usize {
        match status {
            DiffStatus::Unchanged => self.unchanged,
            DiffStatus::Changed => self.changed,
            DiffStatus::Added => self.added,
            DiffStatus::Deleted => self.deleted,
            DiffStatus::Invalid => self.invalid,
        }
    }

    pub fn total(&self) -> usize {
        self.unchanged + self.changed + self.added + self.deleted + self.invalid
    }

    /// Whether every class compared equal
    pub fn is_identical(&self) -> bool {
        self.total() == self.unchanged
    }
}

/// Diff of two snapshots: one [`TreeDiff`] per class id in either input
///
/// Order: classes of the left snapshot in left order, then right-only
/// classes in right order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDiff {
    pub left_version: Version,
    pub right_version: Version,
    pub left_kind: String,
    pub right_kind: String,
    pub tree_diffs: Vec<TreeDiff>,
}

impl SnapshotDiff {
    pub fn find(&self, class_id: i32) -> Option<&TreeDiff> {
        self.tree_diffs.iter().find(|t| t.class_id == class_id)
    }

    pub fn count(&self, status: DiffStatus) -> usize {
        self.tree_diffs.iter().filter(|t| t.status == status).count()
    }

    pub fn summary(&self) -> DiffSummary {
        let mut summary = DiffSummary::default();
        for tree in &self.tree_diffs {
            let slot = match tree.status {
                DiffStatus::Unchanged => &mut summary.unchanged,
                DiffStatus::Changed => &mut summary.changed,
                DiffStatus::Added => &mut summary.added,
                DiffStatus::Deleted => &mut summary.deleted,
                DiffStatus::Invalid => &mut summary.invalid,
            };
            *slot += 1;
        }
        summary
    }
}
