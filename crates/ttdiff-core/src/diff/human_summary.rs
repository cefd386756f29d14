//! Human-readable summary renderer for snapshot diffs.

use super::model::{DiffStatus, Side, SnapshotDiff};

/// Render a Markdown summary of a [`SnapshotDiff`]
///
/// Lists the two versions, per-status class counts, and a table of every
/// class whose status is not `Unchanged`.
pub fn render_human_summary(diff: &SnapshotDiff) -> String {
    let mut out = String::new();

    out.push_str("## Type Tree Diff\n\n");
    out.push_str(&format!(
        "**Left**: {} ({})  \n**Right**: {} ({})\n\n",
        diff.left_version, diff.left_kind, diff.right_version, diff.right_kind
    ));

    let summary = diff.summary();
    out.push_str("| Status | Classes |\n|---|---|\n");
    for status in DiffStatus::ALL {
        out.push_str(&format!("| {} | {} |\n", status, summary.get(status)));
    }
    out.push('\n');

    if summary.is_identical() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str("### Classes\n\n");
    out.push_str("| Class ID | Left | Right | Status |\n|---|---|---|---|\n");
    for tree in diff
        .tree_diffs
        .iter()
        .filter(|t| t.status != DiffStatus::Unchanged)
    {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            tree.class_id,
            cell(tree.is_present_on(Side::Left), &tree.left_name),
            cell(tree.is_present_on(Side::Right), &tree.right_name),
            tree.status
        ));
    }
    out
}

fn cell(present: bool, name: &str) -> &str {
    if present {
        name
    } else {
        "-"
    }
}
