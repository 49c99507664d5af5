//! Field and document diff orchestration.
//!
//! [`DiffEngine`] runs the full pipeline for one field: line tokenizing,
//! alignment, block pairing with word sub-diffs, then context collapsing.
//! [`DiffEngine::diff_document`] repeats it for every [`TrackedField`] and
//! keeps only the fields that changed.
//!
//! The free functions at the bottom use the default configuration.

use crate::config::DiffConfig;
use crate::diff::blocks::group_blocks;
use crate::diff::collapse::collapse_context;
use crate::diff::model::{DiffStats, DocumentDiffResult, FieldDiffResult};
use crate::diff::sequence::{MyersDiffer, SequenceDiffer};
use crate::diff::tokenize::tokenize_lines;
use crate::errors::{ExError, Result};
use crate::snapshot::{DocumentSnapshot, TrackedField};
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::time::Instant;

/// Configured diff pipeline. Cheap to clone and safe to share across threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffEngine {
    config: DiffConfig,
}

impl DiffEngine {
    /// Create an engine from a validated configuration.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `config` fails [`DiffConfig::validate`].
    pub fn new(config: DiffConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    fn line_differ(&self) -> MyersDiffer {
        MyersDiffer::new(self.config.max_lines)
            .with_algorithm(self.config.algorithm)
            .with_timeout(self.config.timeout())
    }

    fn word_differ(&self) -> MyersDiffer {
        MyersDiffer::new(self.config.max_line_tokens)
            .with_algorithm(self.config.algorithm)
            .with_timeout(self.config.timeout())
    }

    /// Diff one field. `None` as the old text is the baseline case: every
    /// line of `new_text` is reported as added.
    pub fn diff_field(
        &self,
        field: &str,
        label: &str,
        old_text: Option<&str>,
        new_text: &str,
    ) -> FieldDiffResult {
        let start = Instant::now();
        log_op_start!("diff_field", field = field);

        let old_lines = tokenize_lines(old_text.unwrap_or(""));
        let new_lines = tokenize_lines(new_text);
        let alignment = self
            .line_differ()
            .diff(old_lines.as_slice(), new_lines.as_slice());

        if alignment.edit_count() == 0 {
            log_op_end!(
                "diff_field",
                duration_ms = elapsed_ms(start),
                field = field,
                has_changes = false
            );
            return FieldDiffResult::unchanged(field, label);
        }

        let grouped = if alignment.coarse {
            tracing::warn!(
                field = field,
                old_lines = old_lines.len(),
                new_lines = new_lines.len(),
                max_lines = self.config.max_lines,
                "line count above cap; reporting field as one replace block"
            );
            group_blocks(&alignment.ops, None::<&MyersDiffer>)
        } else {
            group_blocks(&alignment.ops, Some(&self.word_differ()))
        };

        if grouped.coarse_pairs > 0 {
            tracing::warn!(
                field = field,
                pairs = grouped.coarse_pairs,
                max_line_tokens = self.config.max_line_tokens,
                "word count above cap; modified lines carry coarse word spans"
            );
        }

        let stats = grouped.stats;
        let unified_lines = collapse_context(grouped.lines, &self.config.collapse);

        log_op_end!(
            "diff_field",
            duration_ms = elapsed_ms(start),
            field = field,
            has_changes = true,
            blocks = grouped.blocks,
            added = stats.added,
            removed = stats.removed,
            modified = stats.modified
        );

        FieldDiffResult {
            field: field.to_string(),
            label: label.to_string(),
            has_changes: true,
            unified_lines,
            stats,
        }
    }

    /// Diff every tracked field of two snapshots.
    ///
    /// `None` as the old snapshot is the baseline case. Unchanged fields are
    /// dropped, `content` comes first when it changed, and the remaining
    /// fields keep their [`TrackedField::ALL`] order.
    pub fn diff_document(
        &self,
        old: Option<&DocumentSnapshot>,
        new: &DocumentSnapshot,
    ) -> DocumentDiffResult {
        let start = Instant::now();
        log_op_start!("diff_document", baseline = old.is_none());

        let mut fields: Vec<FieldDiffResult> = TrackedField::ALL
            .iter()
            .map(|f| self.diff_field(f.key(), f.label(), old.map(|s| s.text(*f)), new.text(*f)))
            .filter(|r| r.has_changes)
            .collect();

        // Stable: non-content fields keep declaration order.
        fields.sort_by_key(|r| r.field != TrackedField::Content.key());

        let total_stats: DiffStats = fields.iter().map(|f| f.stats).sum();

        log_op_end!(
            "diff_document",
            duration_ms = elapsed_ms(start),
            changed_fields = fields.len()
        );

        DocumentDiffResult {
            fields,
            total_stats,
        }
    }

    /// Diff two snapshots given as JSON objects.
    ///
    /// # Errors
    ///
    /// `InvalidInput` naming `old_snapshot` / `new_snapshot` (or one of their
    /// tracked fields) when the JSON has the wrong shape.
    pub fn diff_document_json(
        &self,
        old: Option<&Value>,
        new: &Value,
    ) -> std::result::Result<DocumentDiffResult, ExError> {
        let start = Instant::now();

        let parsed = old
            .map(|v| DocumentSnapshot::from_json(v, "old_snapshot"))
            .transpose()
            .and_then(|old| Ok((old, DocumentSnapshot::from_json(new, "new_snapshot")?)));

        match parsed {
            Ok((old, new)) => Ok(self.diff_document(old.as_ref(), &new)),
            Err(err) => {
                log_op_error!(
                    "diff_document_json",
                    err.clone(),
                    duration_ms = elapsed_ms(start)
                );
                Err(ExError::from(err).with_op("diff_document_json"))
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Diff one field with the default configuration.
pub fn diff_field(field: &str, label: &str, old_text: &str, new_text: &str) -> FieldDiffResult {
    DiffEngine::default().diff_field(field, label, Some(old_text), new_text)
}

/// Diff two snapshots with the default configuration.
pub fn diff_document(old: Option<&DocumentSnapshot>, new: &DocumentSnapshot) -> DocumentDiffResult {
    DiffEngine::default().diff_document(old, new)
}

/// Diff two JSON snapshots with the default configuration.
///
/// # Errors
///
/// As [`DiffEngine::diff_document_json`].
pub fn diff_document_json(
    old: Option<&Value>,
    new: &Value,
) -> std::result::Result<DocumentDiffResult, ExError> {
    DiffEngine::default().diff_document_json(old, new)
}
