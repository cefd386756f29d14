//! Diff command
//!
//! Usage: ttdiff diff <LEFT> <RIGHT> [--class <ID>] [--format text|json|markdown]

use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use ttdiff_core::diff::render_human_summary;
use ttdiff_core::render::render_side_by_side;
use ttdiff_core::{DiffStatus, Side, SnapshotDiff};
use ttdiff_engine::commands::compare::DiffSession;
use ttdiff_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use ttdiff_engine::EngineConfig;

use super::{emit, CliResult, OutputFormat};

#[derive(Debug, Args)]
pub struct DiffArgs {
    /// Older dump
    pub left: PathBuf,

    /// Newer dump
    pub right: PathBuf,

    /// Show the field-level diff of one class
    #[arg(short, long)]
    pub class: Option<i32>,

    /// List unchanged classes too
    #[arg(long)]
    pub all: bool,

    /// Left pane width for the side-by-side class view
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: DiffArgs, config: &EngineConfig) -> CliResult {
    let cmd = EngineCommand::Diff {
        left: args.left.clone(),
        right: args.right.clone(),
    };
    let session = match apply_engine_command(cmd, config)? {
        EngineCommandResult::Diffed(session) => session,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    let text = match args.class {
        Some(class_id) => class_view(&session, class_id, &args)?,
        None => snapshot_view(session.diff(), &args)?,
    };
    emit(&text, args.output.as_ref())
}

fn class_view(
    session: &DiffSession,
    class_id: i32,
    args: &DiffArgs,
) -> Result<String, Box<dyn std::error::Error>> {
    let tree = session.class_diff(class_id)?;
    let text = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(tree)? + "\n",
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut out = format!(
                "{} {} -> {} [{}]\n",
                tree.class_id,
                tree.name_on(Side::Left),
                tree.name_on(Side::Right),
                tree.status
            );
            out.push_str(&render_side_by_side(tree, args.width));
            out
        }
    };
    Ok(text)
}

fn snapshot_view(diff: &SnapshotDiff, args: &DiffArgs) -> Result<String, Box<dyn std::error::Error>> {
    let text = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(diff)? + "\n",
        OutputFormat::Markdown => render_human_summary(diff),
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{} ({}) -> {} ({})",
                diff.left_version, diff.left_kind, diff.right_version, diff.right_kind
            );
            for tree in &diff.tree_diffs {
                if tree.status == DiffStatus::Unchanged && !args.all {
                    continue;
                }
                let name = if tree.is_present_on(Side::Right) {
                    tree.name_on(Side::Right)
                } else {
                    tree.name_on(Side::Left)
                };
                let _ = writeln!(out, "{:<9} {:>6} {}", tree.status.label(), tree.class_id, name);
            }
            let summary = diff.summary();
            let _ = writeln!(
                out,
                "{} changed, {} added, {} deleted, {} invalid, {} unchanged",
                summary.changed, summary.added, summary.deleted, summary.invalid, summary.unchanged
            );
            out
        }
    };
    Ok(text)
}
