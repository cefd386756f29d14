//! Snapshot differ: pairs descriptors by class id and builds [`TreeDiff`]s.
//!
//! The core entry point is [`diff_snapshots`].

use std::collections::HashMap;

use super::model::{DiffStatus, SnapshotDiff, TreeDiff};
use super::node::{build_node_diff, one_sided, NodePair};
use crate::errors::{DumpError, Result};
use crate::model::{Snapshot, TypeDescriptor};

/// Knobs for [`diff_snapshots`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Reject inputs unless the left version is strictly older
    pub strict_version_order: bool,
}

/// What to build a [`TreeDiff`] from
#[derive(Debug, Clone, Copy)]
pub enum ClassPair<'a> {
    Added(&'a TypeDescriptor),
    Deleted(&'a TypeDescriptor),
    Matched {
        left: &'a TypeDescriptor,
        right: &'a TypeDescriptor,
    },
}

/// Build the class-level diff for one class id
///
/// # Errors
///
/// - `ClassIdMismatch` if a matched pair has different class ids
/// - `FieldNameMismatch` if field alignment pairs differently named fields
pub fn build_tree_diff(pair: ClassPair<'_>) -> Result<TreeDiff> {
    match pair {
        ClassPair::Added(desc) => Ok(one_sided_tree(desc, DiffStatus::Added)),
        ClassPair::Deleted(desc) => Ok(one_sided_tree(desc, DiffStatus::Deleted)),
        ClassPair::Matched { left, right } => matched_tree(left, right),
    }
}

fn one_sided_tree(desc: &TypeDescriptor, status: DiffStatus) -> TreeDiff {
    let node = if desc.is_abstract || !desc.is_valid {
        None
    } else {
        desc.root.as_ref().map(|root| one_sided(root, status))
    };
    TreeDiff {
        class_id: desc.class_id,
        left_name: desc.class_name.clone(),
        right_name: desc.class_name.clone(),
        left_base_name: desc.base_name().to_string(),
        right_base_name: desc.base_name().to_string(),
        left_inheritance: desc.inheritance.clone(),
        right_inheritance: desc.inheritance.clone(),
        status,
        node,
    }
}

fn matched_tree(left: &TypeDescriptor, right: &TypeDescriptor) -> Result<TreeDiff> {
    if left.class_id != right.class_id {
        return Err(DumpError::ClassIdMismatch {
            left: left.class_id,
            right: right.class_id,
        });
    }

    let mut tree = TreeDiff {
        class_id: left.class_id,
        left_name: left.class_name.clone(),
        right_name: right.class_name.clone(),
        left_base_name: left.base_name().to_string(),
        right_base_name: right.base_name().to_string(),
        left_inheritance: left.inheritance.clone(),
        right_inheritance: right.inheritance.clone(),
        status: DiffStatus::Invalid,
        node: None,
    };
    if !left.is_valid || !right.is_valid {
        return Ok(tree);
    }

    let names_status = if tree.names_match() {
        DiffStatus::Unchanged
    } else {
        DiffStatus::Changed
    };
    if left.is_abstract || right.is_abstract {
        tree.status = names_status;
        return Ok(tree);
    }

    let node = match (&left.root, &right.root) {
        (Some(l), Some(r)) => Some(build_node_diff(NodePair::Root { left: l, right: r })?),
        (Some(l), None) => Some(one_sided(l, DiffStatus::Deleted)),
        (None, Some(r)) => Some(one_sided(r, DiffStatus::Added)),
        (None, None) => None,
    };
    tree.status = match (&node, names_status) {
        (_, DiffStatus::Changed) => DiffStatus::Changed,
        (Some(n), _) if n.status != DiffStatus::Unchanged => DiffStatus::Changed,
        _ => DiffStatus::Unchanged,
    };
    tree.node = node;
    Ok(tree)
}

/// Diff two canonical snapshots class by class
///
/// Left classes come first in left order (matched or deleted), followed by
/// right-only classes in right order.
///
/// # Errors
///
/// - `VersionOrder` if `options.strict_version_order` is set and the left
///   version is not older than the right
/// - any error of [`build_tree_diff`]
pub fn diff_snapshots(left: &Snapshot, right: &Snapshot, options: &DiffOptions) -> Result<SnapshotDiff> {
    if options.strict_version_order && left.version >= right.version {
        return Err(DumpError::VersionOrder {
            left: left.version.to_string(),
            right: right.version.to_string(),
        });
    }

    let mut unmatched: HashMap<i32, &TypeDescriptor> = right
        .descriptors()
        .iter()
        .map(|d| (d.class_id, d))
        .collect();

    let mut tree_diffs = Vec::with_capacity(left.descriptors().len().max(right.descriptors().len()));
    for desc in left.descriptors() {
        let pair = match unmatched.remove(&desc.class_id) {
            Some(counterpart) => ClassPair::Matched {
                left: desc,
                right: counterpart,
            },
            None => ClassPair::Deleted(desc),
        };
        tree_diffs.push(build_tree_diff(pair)?);
    }
    for desc in right.descriptors() {
        if unmatched.contains_key(&desc.class_id) {
            tree_diffs.push(build_tree_diff(ClassPair::Added(desc))?);
        }
    }

    let diff = SnapshotDiff {
        left_version: left.version,
        right_version: right.version,
        left_kind: left.kind.clone(),
        right_kind: right.kind.clone(),
        tree_diffs,
    };
    let summary = diff.summary();
    tracing::debug!(
        tree_diff_count = diff.tree_diffs.len(),
        changed = summary.changed,
        added = summary.added,
        deleted = summary.deleted,
        invalid = summary.invalid,
        "diffed snapshots"
    );
    Ok(diff)
}
