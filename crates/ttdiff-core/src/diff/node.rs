//! Field-tree differ: builds [`NodeDiff`] trees from field nodes.

use std::sync::Arc;

use super::model::{DiffStatus, NodeDiff};
use crate::errors::{DumpError, Result};
use crate::model::FieldNode;

/// What to build a [`NodeDiff`] from
#[derive(Debug, Clone, Copy)]
pub enum NodePair<'a> {
    /// Field exists only on the right
    Added(&'a FieldNode),
    /// Field exists only on the left
    Deleted(&'a FieldNode),
    /// Same-named fields on both sides
    Matched {
        left: &'a FieldNode,
        right: &'a FieldNode,
    },
    /// Root fields of a matched class; children are aligned even when the
    /// root types differ
    Root {
        left: &'a FieldNode,
        right: &'a FieldNode,
    },
}

/// Build the diff tree for a pair of fields
///
/// # Errors
///
/// Returns [`DumpError::FieldNameMismatch`] if a matched pair (at any depth
/// reached through alignment) has different names.
pub fn build_node_diff(pair: NodePair<'_>) -> Result<NodeDiff> {
    match pair {
        NodePair::Added(node) => Ok(one_sided(node, DiffStatus::Added)),
        NodePair::Deleted(node) => Ok(one_sided(node, DiffStatus::Deleted)),
        NodePair::Matched { left, right } => two_sided(left, right, false),
        NodePair::Root { left, right } => two_sided(left, right, true),
    }
}

/// Every node gets its type on one side only; the child list is shared by
/// both views so the other pane renders the subtree as ghost rows
pub(crate) fn one_sided(node: &FieldNode, status: DiffStatus) -> NodeDiff {
    let added = status == DiffStatus::Added;
    let children: Arc<[NodeDiff]> = node
        .children
        .iter()
        .map(|c| one_sided(c, status))
        .collect::<Vec<_>>()
        .into();
    NodeDiff {
        name: node.name.clone(),
        left_type: if added { String::new() } else { node.type_name.clone() },
        right_type: if added { node.type_name.clone() } else { String::new() },
        left_align: !added && node.is_align(),
        right_align: added && node.is_align(),
        status,
        left_children: children.clone(),
        right_children: children,
    }
}

fn two_sided(left: &FieldNode, right: &FieldNode, force_merge: bool) -> Result<NodeDiff> {
    if left.name != right.name {
        return Err(DumpError::FieldNameMismatch {
            left: left.name.clone(),
            right: right.name.clone(),
        });
    }

    let mut status = if left.is_align() == right.is_align() {
        DiffStatus::Unchanged
    } else {
        DiffStatus::Changed
    };

    let same_type = left.type_name == right.type_name;
    let children: Arc<[NodeDiff]> = if same_type || force_merge {
        let children = align_children(left, right)?;
        if !same_type || children.iter().any(|c| c.status != DiffStatus::Unchanged) {
            status = DiffStatus::Changed;
        }
        children.into()
    } else {
        // unrelated subtrees: old children out, new children in
        status = DiffStatus::Changed;
        left.children
            .iter()
            .map(|c| one_sided(c, DiffStatus::Deleted))
            .chain(right.children.iter().map(|c| one_sided(c, DiffStatus::Added)))
            .collect::<Vec<_>>()
            .into()
    };

    Ok(NodeDiff {
        name: left.name.clone(),
        left_type: left.type_name.clone(),
        right_type: right.type_name.clone(),
        left_align: left.is_align(),
        right_align: right.is_align(),
        status,
        left_children: children.clone(),
        right_children: children,
    })
}

/// Greedy name-based alignment of two child lists
///
/// Equal names at both cursors match. Otherwise the right list is scanned
/// ahead for the current left name: right children before the hit are
/// insertions; without a hit the left child is a deletion.
fn align_children(left: &FieldNode, right: &FieldNode) -> Result<Vec<NodeDiff>> {
    let (lhs, rhs) = (&left.children, &right.children);
    let mut out = Vec::with_capacity(lhs.len().max(rhs.len()));
    let (mut li, mut ri) = (0, 0);

    while li < lhs.len() || ri < rhs.len() {
        if li == lhs.len() {
            out.push(one_sided(&rhs[ri], DiffStatus::Added));
            ri += 1;
            continue;
        }
        if ri == rhs.len() {
            out.push(one_sided(&lhs[li], DiffStatus::Deleted));
            li += 1;
            continue;
        }

        let current = &lhs[li];
        if current.name == rhs[ri].name {
            out.push(two_sided(current, &rhs[ri], false)?);
            li += 1;
            ri += 1;
            continue;
        }

        if rhs[ri + 1..].iter().any(|c| c.name == current.name) {
            while rhs[ri].name != current.name {
                out.push(one_sided(&rhs[ri], DiffStatus::Added));
                ri += 1;
            }
        } else {
            out.push(one_sided(current, DiffStatus::Deleted));
            li += 1;
        }
    }

    Ok(out)
}
