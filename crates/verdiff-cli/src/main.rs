//! Verdiff CLI
//!
//! Command-line interface for the verdiff document diff engine

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use verdiff_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "verdiff")]
#[command(about = "Verdiff - Field-level version diffs for documents", long_about = None)]
struct Cli {
    /// TOML file with diff engine settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs to stderr with the given profile
    #[arg(long, global = true, value_enum)]
    log: Option<LogProfile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogProfile {
    Development,
    Production,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two versions of a single text field
    Field(commands::field::FieldArgs),
    /// Diff two document snapshots given as JSON files
    Document(commands::document::DocumentArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        Some(LogProfile::Development) => init(Profile::Development),
        Some(LogProfile::Production) => init(Profile::Production),
        None => {}
    }

    let result = commands::load_engine(cli.config.as_deref()).and_then(|engine| match cli.command {
        Commands::Field(args) => commands::field::execute(&engine, args),
        Commands::Document(args) => commands::document::execute(&engine, args),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
