//! Engine-level commands dispatched by front ends.

use std::path::PathBuf;

use ttdiff_core::render::{render_class_enum, render_type_tree};
use ttdiff_core::Snapshot;

use crate::commands::compare::DiffSession;
use crate::commands::load::load_snapshot;
use crate::config::EngineConfig;
use crate::errors::{class_not_found, Result};

/// Engine-level commands that read dumps from disk.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Load one dump.
    Inspect { path: PathBuf },
    /// Load two dumps and diff them.
    Diff { left: PathBuf, right: PathBuf },
    /// Re-emit one class of a dump in the dump grammar.
    RenderClass { path: PathBuf, class_id: i32 },
    /// Emit every class of a dump as a class-id enum.
    RenderEnum { path: PathBuf },
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    Inspected(Snapshot),
    Diffed(Box<DiffSession>),
    Rendered(String),
}

/// Apply an engine command under the given configuration.
///
/// # Errors
///
/// Propagates load and diff errors; `RenderClass` fails with `InvalidInput`
/// when the class id is not in the dump.
pub fn apply_engine_command(cmd: EngineCommand, config: &EngineConfig) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Inspect { path } => {
            load_snapshot(&path, config).map(EngineCommandResult::Inspected)
        }
        EngineCommand::Diff { left, right } => DiffSession::open(&left, &right, config)
            .map(|session| EngineCommandResult::Diffed(Box::new(session))),
        EngineCommand::RenderClass { path, class_id } => {
            let snapshot = load_snapshot(&path, config)?;
            let descriptor = snapshot
                .find(class_id)
                .ok_or_else(|| class_not_found(class_id).with_op("render_class"))?;
            Ok(EngineCommandResult::Rendered(render_type_tree(descriptor)))
        }
        EngineCommand::RenderEnum { path } => {
            let snapshot = load_snapshot(&path, config)?;
            Ok(EngineCommandResult::Rendered(render_class_enum(&snapshot)))
        }
    }
}
