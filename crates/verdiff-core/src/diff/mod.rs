//! Document version diff engine.
//!
//! Compares two versions of a document field by field and produces a
//! structured, deterministic result for review UIs.
//!
//! ## Entry point
//!
//! ```ignore
//! use verdiff_core::diff::{diff_document, render_human_summary};
//!
//! let diff = diff_document(Some(&old_snapshot), &new_snapshot);
//! let summary = render_human_summary(&diff);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`tokenize`] splits a field into lines.
//! 2. [`sequence`] aligns the two line sequences (Myers by default).
//! 3. [`blocks`] groups non-equal runs, pairs modifications, and runs
//!    [`words`] on each pair.
//! 4. [`collapse`] folds long unchanged runs into separators.
//! 5. [`engine`] repeats this per tracked field and orders the result.

pub mod blocks;
pub mod collapse;
pub mod engine;
pub mod human_summary;
pub mod model;
pub mod sequence;
pub mod tokenize;
pub mod words;

pub use engine::{diff_document, diff_document_json, diff_field, DiffEngine};
pub use human_summary::render_human_summary;
pub use model::{
    DiffLine, DiffStats, DocumentDiffResult, FieldDiffResult, LineKind, SpanKind, WordSpan,
};
