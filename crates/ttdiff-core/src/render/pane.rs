//! Pane rendering: flatten a class diff into display rows for one side.
//!
//! Both sides of the same [`TreeDiff`] always yield the same number of rows,
//! so row `i` of the left pane lines up with row `i` of the right pane.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diff::{DiffStatus, NodeDiff, Side, TreeDiff};

/// Spaces per indent level in text output
const INDENT_WIDTH: usize = 6;

/// One display row of a pane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaneRow {
    pub indent: usize,
    /// Empty for ghost and separator rows
    pub type_name: String,
    pub name: String,
    pub align: bool,
    pub status: DiffStatus,
}

impl PaneRow {
    fn blank(status: DiffStatus) -> Self {
        Self {
            indent: 0,
            type_name: String::new(),
            name: String::new(),
            align: false,
            status,
        }
    }

    /// Whether the row shows nothing on this side
    pub fn is_blank(&self) -> bool {
        self.type_name.is_empty()
    }
}

impl fmt::Display for PaneRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_blank() {
            return Ok(());
        }
        write!(f, "{:width$}{}", "", self.type_name, width = self.indent * INDENT_WIDTH)?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        if self.align {
            write!(f, " (align)")?;
        }
        Ok(())
    }
}

fn header_status(tree: &TreeDiff) -> DiffStatus {
    match tree.status {
        DiffStatus::Added | DiffStatus::Deleted | DiffStatus::Invalid => tree.status,
        _ if tree.names_match() => DiffStatus::Unchanged,
        _ => DiffStatus::Changed,
    }
}

fn push_rows(rows: &mut Vec<PaneRow>, node: &NodeDiff, side: Side, indent: usize) {
    rows.push(PaneRow {
        indent,
        type_name: node.type_on(side).to_string(),
        name: node.name.clone(),
        align: node.align_on(side),
        status: node.status,
    });
    for child in node.children_on(side) {
        push_rows(rows, child, side, indent + 1);
    }
}

/// Rows for one pane: the class hierarchy header, then (if the class has a
/// field tree) a separator and the depth-first field rows
pub fn pane_rows(tree: &TreeDiff, side: Side) -> Vec<PaneRow> {
    let mut rows = Vec::new();
    let status = header_status(tree);
    if tree.is_present_on(side) {
        rows.push(PaneRow {
            type_name: tree.hierarchy(side),
            ..PaneRow::blank(status)
        });
    } else {
        rows.push(PaneRow::blank(status));
    }

    if let Some(node) = &tree.node {
        rows.push(PaneRow::blank(DiffStatus::Unchanged));
        push_rows(&mut rows, node, side, 0);
    }
    rows
}

fn marker(status: DiffStatus) -> char {
    match status {
        DiffStatus::Unchanged => ' ',
        DiffStatus::Changed => '~',
        DiffStatus::Added => '+',
        DiffStatus::Deleted => '-',
        DiffStatus::Invalid => '!',
    }
}

/// Both panes as plain text, one status-marked row per line
///
/// `width` is the column width reserved for the left pane.
pub fn render_side_by_side(tree: &TreeDiff, width: usize) -> String {
    let left = pane_rows(tree, Side::Left);
    let right = pane_rows(tree, Side::Right);
    let mut out = String::new();
    for (l, r) in left.iter().zip(&right) {
        let line = format!(
            "{} {:<width$} | {}",
            marker(l.status),
            l.to_string(),
            r,
            width = width
        );
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_display() {
        let row = PaneRow {
            indent: 2,
            type_name: "int".into(),
            name: "m_Value".into(),
            align: true,
            status: DiffStatus::Unchanged,
        };
        assert_eq!(row.to_string(), "            int m_Value (align)");
    }

    #[test]
    fn test_blank_row_displays_empty() {
        assert_eq!(PaneRow::blank(DiffStatus::Added).to_string(), "");
    }
}
