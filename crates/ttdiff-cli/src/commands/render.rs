//! Render command
//!
//! Usage: ttdiff render class <DUMP> <CLASS_ID> [--output <FILE>]
//!        ttdiff render enum <DUMP> [--output <FILE>]

use clap::{Args, Subcommand};
use std::path::PathBuf;
use ttdiff_engine::commands::engine_command::{
    apply_engine_command, EngineCommand, EngineCommandResult,
};
use ttdiff_engine::EngineConfig;

use super::{emit, CliResult};

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(subcommand)]
    pub command: RenderCommand,
}

#[derive(Debug, Subcommand)]
pub enum RenderCommand {
    /// Re-emit one class in dump form
    Class(RenderClassArgs),
    /// Emit every class as a class-id enum
    Enum(RenderEnumArgs),
}

#[derive(Debug, Args)]
pub struct RenderClassArgs {
    /// Dump file to load
    pub path: PathBuf,

    /// Class ID to render
    pub class_id: i32,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RenderEnumArgs {
    /// Dump file to load
    pub path: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute render command
pub fn execute(args: RenderArgs, config: &EngineConfig) -> CliResult {
    let (cmd, output) = match args.command {
        RenderCommand::Class(class_args) => (
            EngineCommand::RenderClass {
                path: class_args.path,
                class_id: class_args.class_id,
            },
            class_args.output,
        ),
        RenderCommand::Enum(enum_args) => (
            EngineCommand::RenderEnum {
                path: enum_args.path,
            },
            enum_args.output,
        ),
    };

    match apply_engine_command(cmd, config)? {
        EngineCommandResult::Rendered(text) => emit(&text, output.as_ref()),
        other => Err(format!("unexpected engine result: {:?}", other).into()),
    }
}
