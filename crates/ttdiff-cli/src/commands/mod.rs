//! Subcommand implementations and shared flags

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use ttdiff_engine::EngineConfig;

pub mod diff;
pub mod inspect;
pub mod render;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip canonicalization and work on raw field trees
    #[arg(long, global = true)]
    pub raw: bool,

    /// Require the left dump to be older than the right one
    #[arg(long, global = true)]
    pub strict_version_order: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

/// Config file (or defaults) with command-line overrides applied
pub fn resolve_config(args: &GlobalArgs) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    if args.raw {
        config.canonicalize = false;
    }
    if args.strict_version_order {
        config.strict_version_order = true;
    }
    Ok(config)
}

/// Print to stdout or write to a file
pub fn emit(text: &str, output: Option<&PathBuf>) -> CliResult {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
