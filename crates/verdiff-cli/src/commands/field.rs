//! Field diff command
//!
//! Usage: verdiff field [--old <FILE>] --new <FILE> [--field <KEY>] [--label <LABEL>]

use super::{print_document, read_text, CliResult, OutputFormat};
use clap::Args;
use std::path::PathBuf;
use verdiff_core::{DiffEngine, DocumentDiffResult, FieldDiffResult, TrackedField};

#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Previous version (omit for a first version)
    #[arg(long)]
    pub old: Option<PathBuf>,

    /// Current version
    #[arg(long)]
    pub new: PathBuf,

    /// Field key reported in the result
    #[arg(long, default_value = "content")]
    pub field: String,

    /// Display label (defaults to the tracked field's label, else the key)
    #[arg(long)]
    pub label: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

/// Execute field command
pub fn execute(engine: &DiffEngine, args: FieldArgs) -> CliResult<()> {
    let old_text = args.old.as_deref().map(read_text).transpose()?;
    let new_text = read_text(&args.new)?;

    let label = args.label.unwrap_or_else(|| default_label(&args.field));
    let result = engine.diff_field(&args.field, &label, old_text.as_deref(), &new_text);

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Summary => print_document(&as_document(result), OutputFormat::Summary)?,
    }
    Ok(())
}

fn default_label(field: &str) -> String {
    TrackedField::from_key(field)
        .map(|f| f.label().to_string())
        .unwrap_or_else(|| field.to_string())
}

fn as_document(result: FieldDiffResult) -> DocumentDiffResult {
    let total_stats = result.stats;
    let fields = if result.has_changes {
        vec![result]
    } else {
        Vec::new()
    };
    DocumentDiffResult {
        fields,
        total_stats,
    }
}
