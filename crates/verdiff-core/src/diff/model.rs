//! Document diff output types.
//!
//! All types implement `Debug, Clone, Serialize, Deserialize, PartialEq` so a
//! renderer can receive them as JSON without loss. Optional members are
//! omitted from the JSON form when absent.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Classification of one rendered row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    Unchanged,
    Added,
    Removed,
    /// Placeholder for a collapsed run of unchanged lines
    Separator,
}

/// Classification of one token segment within a word-level sub-diff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Unchanged,
    Added,
    Removed,
}

/// One token segment of a modified line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WordSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl WordSpan {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// One rendered row of a diff.
///
/// `Unchanged` rows carry both line numbers, `Removed` only the old one,
/// `Added` only the new one, and `Separator` rows carry neither.
/// `word_spans` is present only on the removed/added halves of a modified pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiffLine {
    pub kind: LineKind,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_line_no: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_line_no: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_spans: Option<Vec<WordSpan>>,
}

impl DiffLine {
    pub fn unchanged(content: impl Into<String>, old_line_no: usize, new_line_no: usize) -> Self {
        Self {
            kind: LineKind::Unchanged,
            content: content.into(),
            old_line_no: Some(old_line_no),
            new_line_no: Some(new_line_no),
            word_spans: None,
        }
    }

    pub fn removed(content: impl Into<String>, old_line_no: usize) -> Self {
        Self {
            kind: LineKind::Removed,
            content: content.into(),
            old_line_no: Some(old_line_no),
            new_line_no: None,
            word_spans: None,
        }
    }

    pub fn added(content: impl Into<String>, new_line_no: usize) -> Self {
        Self {
            kind: LineKind::Added,
            content: content.into(),
            old_line_no: None,
            new_line_no: Some(new_line_no),
            word_spans: None,
        }
    }

    /// A marker standing in for `hidden` unchanged lines.
    pub fn separator(hidden: usize) -> Self {
        let noun = if hidden == 1 { "line" } else { "lines" };
        Self {
            kind: LineKind::Separator,
            content: format!("… {hidden} unchanged {noun} …"),
            old_line_no: None,
            new_line_no: None,
            word_spans: None,
        }
    }

    pub fn with_word_spans(mut self, spans: Vec<WordSpan>) -> Self {
        self.word_spans = Some(spans);
        self
    }

    pub fn is_separator(&self) -> bool {
        self.kind == LineKind::Separator
    }
}

/// Aggregate counters for a diff.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl DiffStats {
    pub fn new(added: usize, removed: usize, modified: usize) -> Self {
        Self {
            added,
            removed,
            modified,
        }
    }

    /// Counters for one change block of `removed` deletions and `added` insertions.
    pub fn for_block(removed: usize, added: usize) -> Self {
        Self {
            added: added.saturating_sub(removed),
            removed: removed.saturating_sub(added),
            modified: removed.min(added),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.added == 0 && self.removed == 0 && self.modified == 0
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}

impl Add for DiffStats {
    type Output = DiffStats;

    fn add(self, rhs: DiffStats) -> DiffStats {
        DiffStats {
            added: self.added + rhs.added,
            removed: self.removed + rhs.removed,
            modified: self.modified + rhs.modified,
        }
    }
}

impl AddAssign for DiffStats {
    fn add_assign(&mut self, rhs: DiffStats) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for DiffStats {
    fn sum<I: Iterator<Item = DiffStats>>(iter: I) -> Self {
        iter.fold(DiffStats::default(), Add::add)
    }
}

/// Diff of a single document field.
///
/// `has_changes == false` exactly when `unified_lines` is empty and `stats`
/// is all zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDiffResult {
    pub field: String,
    pub label: String,
    pub has_changes: bool,
    pub unified_lines: Vec<DiffLine>,
    pub stats: DiffStats,
}

impl FieldDiffResult {
    /// Result for a field whose two versions are line-identical.
    pub fn unchanged(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            has_changes: false,
            unified_lines: Vec::new(),
            stats: DiffStats::default(),
        }
    }

    pub fn separator_count(&self) -> usize {
        self.unified_lines.iter().filter(|l| l.is_separator()).count()
    }
}

/// Diff of an entire snapshot pair.
///
/// `fields` only holds changed fields, `content` first when present, and
/// `total_stats` is the element-wise sum of their stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentDiffResult {
    pub fields: Vec<FieldDiffResult>,
    pub total_stats: DiffStats,
}

impl DocumentDiffResult {
    pub fn has_changes(&self) -> bool {
        !self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&FieldDiffResult> {
        self.fields.iter().find(|f| f.field == name)
    }

    /// Serialize to pretty JSON for a renderer or the CLI.
    ///
    /// # Errors
    ///
    /// `Serialization` if the JSON writer fails.
    pub fn to_json_pretty(&self) -> crate::errors::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
