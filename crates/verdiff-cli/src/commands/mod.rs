//! Subcommands and the helpers they share

pub mod document;
pub mod field;

use clap::ValueEnum;
use std::path::Path;
use verdiff_core::{render_human_summary, DiffConfig, DiffEngine, DiffError, DocumentDiffResult};

pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// How a result is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON of the structured result
    #[default]
    Json,
    /// Markdown summary with a unified diff per field
    Summary,
}

/// Build the engine from `--config`, or the defaults when absent.
pub fn load_engine(config: Option<&Path>) -> CliResult<DiffEngine> {
    let config = match config {
        Some(path) => DiffConfig::load(path)?,
        None => DiffConfig::default(),
    };
    Ok(DiffEngine::new(config)?)
}

pub fn read_text(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        DiffError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

pub fn print_document(result: &DocumentDiffResult, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", result.to_json_pretty()?),
        OutputFormat::Summary => print!("{}", render_human_summary(result)),
    }
    Ok(())
}
