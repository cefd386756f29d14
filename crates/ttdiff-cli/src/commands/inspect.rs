//! Inspect command
//!
//! Usage: ttdiff inspect <DUMP> [--format text|json]

use clap::Args;
use std::fmt::Write as _;
use std::path::PathBuf;
use ttdiff_core::Snapshot;
use ttdiff_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use ttdiff_engine::EngineConfig;

use super::{emit, CliResult, OutputFormat};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Dump file to load
    pub path: PathBuf,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: InspectArgs, config: &EngineConfig) -> CliResult {
    let snapshot = match apply_engine_command(EngineCommand::Inspect { path: args.path }, config)? {
        EngineCommandResult::Inspected(snapshot) => snapshot,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    let text = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&snapshot)? + "\n",
        OutputFormat::Text | OutputFormat::Markdown => describe(&snapshot),
    };
    emit(&text, args.output.as_ref())
}

fn describe(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "version: {} ({})", snapshot.version, snapshot.kind);
    let _ = writeln!(
        out,
        "classes: {} ({} valid)",
        snapshot.descriptors().len(),
        snapshot.valid_count()
    );
    for descriptor in snapshot.descriptors() {
        let fields = descriptor.root.as_ref().map_or(0, |root| root.node_count());
        let state = if !descriptor.is_valid {
            "invalid".to_string()
        } else {
            format!("{} fields", fields)
        };
        let _ = writeln!(out, "  {} [{}]", descriptor, state);
    }
    out
}
