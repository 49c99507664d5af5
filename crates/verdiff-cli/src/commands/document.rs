//! Document diff command
//!
//! Usage: verdiff document [--old <FILE>] --new <FILE> [--format json|summary]

use super::{print_document, read_text, CliResult, OutputFormat};
use clap::Args;
use serde_json::Value;
use std::path::{Path, PathBuf};
use verdiff_core::{DiffEngine, DiffError};

#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Previous snapshot as a JSON object (omit for a first version)
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// Current snapshot as a JSON object
    #[arg(long)]
    pub new: PathBuf,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Execute document command
pub fn execute(engine: &DiffEngine, args: DocumentArgs) -> CliResult<()> {
    let old = args.old.as_deref().map(read_json).transpose()?;
    let new = read_json(&args.new)?;

    let result = engine.diff_document_json(old.as_ref(), &new)?;
    print_document(&result, args.format)
}

fn read_json(path: &Path) -> CliResult<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|e| {
        DiffError::invalid_input(path.display().to_string(), format!("not valid JSON: {e}"))
            .into()
    })
}
