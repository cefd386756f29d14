//! ttdiff CLI
//!
//! Command-line interface for inspecting and diffing type-tree dumps

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "ttdiff")]
#[command(about = "ttdiff - Type tree dump inspection and diffing", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: commands::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Summarize the classes of one dump
    Inspect(commands::inspect::InspectArgs),
    /// Diff two dumps, or one class across them
    Diff(commands::diff::DiffArgs),
    /// Re-emit a class in dump form, or all classes as an enum
    Render(commands::render::RenderArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = commands::resolve_config(&cli.global).and_then(|config| {
        ttdiff_core::logging_facility::init(config.log_profile);
        match cli.command {
            Commands::Inspect(args) => commands::inspect::execute(args, &config),
            Commands::Diff(args) => commands::diff::execute(args, &config),
            Commands::Render(args) => commands::render::execute(args, &config),
        }
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
