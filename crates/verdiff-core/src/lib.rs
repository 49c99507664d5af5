//! Verdiff Core - version diff engine for structured documents
//!
//! This crate compares two snapshots of a document and reports, per field,
//! what a reviewer needs to see:
//! - Line-level alignment with removed/added/unchanged rows and line numbers
//! - Modification pairing inside change blocks with word-level sub-diffs
//! - Context collapsing for long unchanged stretches
//! - Per-field and document-wide added/removed/modified counters
//! - A Markdown summary renderer for terminals and review tools
//!
//! Diffing is pure and deterministic; the only side effect is structured
//! logging through [`logging_facility`].

pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod snapshot;

// Re-export commonly used types
pub use config::{CollapsePolicy, DiffAlgorithm, DiffConfig};
pub use diff::{
    diff_document, diff_document_json, diff_field, render_human_summary, DiffEngine, DiffLine,
    DiffStats, DocumentDiffResult, FieldDiffResult, LineKind, SpanKind, WordSpan,
};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use snapshot::{DocumentSnapshot, TrackedField};
