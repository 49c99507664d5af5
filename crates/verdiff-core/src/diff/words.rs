//! Word-level sub-diff for modified line pairs.

use crate::diff::model::{SpanKind, WordSpan};
use crate::diff::sequence::{Op, SequenceDiffer};
use crate::diff::tokenize::tokenize_words;

/// Word spans for both halves of a modified pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDiff {
    /// `Unchanged` and `Removed` spans; concatenated they give the old line
    pub removed: Vec<WordSpan>,
    /// `Unchanged` and `Added` spans; concatenated they give the new line
    pub added: Vec<WordSpan>,
    /// True when the token cap tripped and the spans are a coarse replace
    pub coarse: bool,
}

/// Diff two lines at word granularity.
///
/// Each op becomes one span: `Equal` lands on both sides as `Unchanged`,
/// `Delete` on the removed side and `Insert` on the added side.
pub fn diff_words<D>(differ: &D, old_line: &str, new_line: &str) -> WordDiff
where
    D: for<'a> SequenceDiffer<&'a str>,
{
    let old_tokens = tokenize_words(old_line);
    let new_tokens = tokenize_words(new_line);
    let alignment = differ.diff(old_tokens.as_slice(), new_tokens.as_slice());

    let mut removed = Vec::with_capacity(old_tokens.len());
    let mut added = Vec::with_capacity(new_tokens.len());

    for op in &alignment.ops {
        match op {
            Op::Equal(text) => {
                removed.push(WordSpan::new(SpanKind::Unchanged, *text));
                added.push(WordSpan::new(SpanKind::Unchanged, *text));
            }
            Op::Delete(text) => removed.push(WordSpan::new(SpanKind::Removed, *text)),
            Op::Insert(text) => added.push(WordSpan::new(SpanKind::Added, *text)),
        }
    }

    WordDiff {
        removed,
        added,
        coarse: alignment.coarse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::sequence::MyersDiffer;

    fn count(spans: &[WordSpan], kind: SpanKind) -> usize {
        spans.iter().filter(|s| s.kind == kind).count()
    }

    fn joined(spans: &[WordSpan]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_single_word_change() {
        let diff = diff_words(
            &MyersDiffer::new(100),
            "The quick brown fox",
            "The fast brown fox",
        );

        assert!(diff
            .removed
            .iter()
            .any(|s| s.kind == SpanKind::Removed && s.text == "quick"));
        assert!(diff
            .added
            .iter()
            .any(|s| s.kind == SpanKind::Added && s.text == "fast"));
        assert!(count(&diff.removed, SpanKind::Unchanged) > count(&diff.removed, SpanKind::Removed));
        assert!(count(&diff.added, SpanKind::Unchanged) > count(&diff.added, SpanKind::Added));
        assert!(!diff.coarse);
    }

    #[test]
    fn test_spans_reconstruct_lines() {
        let old = "let total = price * qty;";
        let new = "let total = price * quantity + tax;";
        let diff = diff_words(&MyersDiffer::new(100), old, new);

        assert_eq!(joined(&diff.removed), old);
        assert_eq!(joined(&diff.added), new);
        assert_eq!(count(&diff.removed, SpanKind::Added), 0);
        assert_eq!(count(&diff.added, SpanKind::Removed), 0);
    }

    #[test]
    fn test_whitespace_change_is_visible() {
        let diff = diff_words(&MyersDiffer::new(100), "a b", "a  b");
        assert!(diff
            .removed
            .iter()
            .any(|s| s.kind == SpanKind::Removed && s.text == " "));
        assert!(diff
            .added
            .iter()
            .any(|s| s.kind == SpanKind::Added && s.text == "  "));
    }

    #[test]
    fn test_token_cap_gives_coarse_spans() {
        let diff = diff_words(&MyersDiffer::new(2), "one two three", "one two four");
        assert!(diff.coarse);
        assert!(diff.removed.iter().all(|s| s.kind == SpanKind::Removed));
        assert!(diff.added.iter().all(|s| s.kind == SpanKind::Added));
        assert_eq!(joined(&diff.removed), "one two three");
    }
}
