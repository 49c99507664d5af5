//! Block grouping and modification pairing.
//!
//! A block is a maximal run of non-equal ops. Inside a block of `r` deletions
//! and `a` insertions the first `min(r, a)` of each are paired by position and
//! reported as modified; the surplus is reported as plain removals or
//! additions. Rows are emitted in unified order: every removed row of the
//! block, then every added row.

use crate::diff::model::{DiffLine, DiffStats};
use crate::diff::sequence::{Op, SequenceDiffer};
use crate::diff::words::diff_words;

/// Numbered rows of one change block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Block<'a> {
    removed: Vec<(usize, &'a str)>,
    added: Vec<(usize, &'a str)>,
}

impl Block<'_> {
    fn stats(&self) -> DiffStats {
        DiffStats::for_block(self.removed.len(), self.added.len())
    }

    fn paired(&self) -> usize {
        self.removed.len().min(self.added.len())
    }
}

/// Rows and counters produced from one line alignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedLines {
    /// `Unchanged`, `Removed` and `Added` rows; no separators yet
    pub lines: Vec<DiffLine>,
    pub stats: DiffStats,
    pub blocks: usize,
    /// Modified pairs whose word spans fell back to a coarse replace
    pub coarse_pairs: usize,
}

/// Walk a line edit script and build numbered rows.
///
/// With `word_differ` set, every modified pair gets word spans. Passing
/// `None` still pairs and counts modifications but leaves `word_spans` unset,
/// which is how the coarse fallback bounds its cost.
pub fn group_blocks<'a, D>(ops: &[Op<&'a str>], word_differ: Option<&D>) -> GroupedLines
where
    D: for<'t> SequenceDiffer<&'t str>,
{
    let mut out = GroupedLines {
        lines: Vec::with_capacity(ops.len()),
        ..GroupedLines::default()
    };
    let mut old_no = 0;
    let mut new_no = 0;
    let mut block: Block<'a> = Block::default();

    for op in ops {
        match op {
            Op::Equal(text) => {
                if !block.removed.is_empty() || !block.added.is_empty() {
                    emit_block(std::mem::take(&mut block), word_differ, &mut out);
                }
                old_no += 1;
                new_no += 1;
                out.lines.push(DiffLine::unchanged(*text, old_no, new_no));
            }
            Op::Delete(text) => {
                old_no += 1;
                block.removed.push((old_no, *text));
            }
            Op::Insert(text) => {
                new_no += 1;
                block.added.push((new_no, *text));
            }
        }
    }

    if !block.removed.is_empty() || !block.added.is_empty() {
        emit_block(block, word_differ, &mut out);
    }

    out
}

fn emit_block<D>(block: Block<'_>, word_differ: Option<&D>, out: &mut GroupedLines)
where
    D: for<'t> SequenceDiffer<&'t str>,
{
    let paired = block.paired();
    let mut removed_rows: Vec<DiffLine> = block
        .removed
        .iter()
        .map(|(no, text)| DiffLine::removed(*text, *no))
        .collect();
    let mut added_rows: Vec<DiffLine> = block
        .added
        .iter()
        .map(|(no, text)| DiffLine::added(*text, *no))
        .collect();

    if let Some(differ) = word_differ {
        for k in 0..paired {
            let words = diff_words(differ, block.removed[k].1, block.added[k].1);
            if words.coarse {
                out.coarse_pairs += 1;
            }
            removed_rows[k].word_spans = Some(words.removed);
            added_rows[k].word_spans = Some(words.added);
        }
    }

    out.stats += block.stats();
    out.blocks += 1;
    out.lines.extend(removed_rows);
    out.lines.extend(added_rows);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::LineKind;
    use crate::diff::sequence::MyersDiffer;

    fn group(ops: &[Op<&str>]) -> GroupedLines {
        group_blocks(ops, Some(&MyersDiffer::new(100)))
    }

    #[test]
    fn test_two_removed_three_added() {
        let ops = [
            Op::Delete("old line 1"),
            Op::Delete("old line 2"),
            Op::Insert("new line 1"),
            Op::Insert("new line 2"),
            Op::Insert("new line 3"),
        ];
        let grouped = group(&ops);

        assert_eq!(grouped.stats, DiffStats::new(1, 0, 2));
        assert_eq!(grouped.blocks, 1);
        let kinds: Vec<LineKind> = grouped.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Removed,
                LineKind::Removed,
                LineKind::Added,
                LineKind::Added,
                LineKind::Added,
            ]
        );
        assert!(grouped.lines[0].word_spans.is_some());
        assert!(grouped.lines[1].word_spans.is_some());
        assert!(grouped.lines[2].word_spans.is_some());
        assert!(grouped.lines[3].word_spans.is_some());
        assert!(grouped.lines[4].word_spans.is_none());
    }

    #[test]
    fn test_surplus_removals() {
        let ops = [
            Op::Equal("keep"),
            Op::Delete("a"),
            Op::Delete("b"),
            Op::Delete("c"),
            Op::Insert("z"),
            Op::Equal("tail"),
        ];
        let grouped = group(&ops);

        assert_eq!(grouped.stats, DiffStats::new(0, 2, 1));
        let c = grouped.lines.iter().find(|l| l.content == "c").unwrap();
        assert_eq!(c.kind, LineKind::Removed);
        assert!(c.word_spans.is_none());
    }

    #[test]
    fn test_line_numbers_follow_both_sides() {
        let ops = [
            Op::Equal("a"),
            Op::Delete("b"),
            Op::Insert("x"),
            Op::Insert("y"),
            Op::Equal("c"),
        ];
        let grouped = group(&ops);
        let numbers: Vec<(Option<usize>, Option<usize>)> = grouped
            .lines
            .iter()
            .map(|l| (l.old_line_no, l.new_line_no))
            .collect();

        assert_eq!(
            numbers,
            vec![
                (Some(1), Some(1)),
                (Some(2), None),
                (None, Some(2)),
                (None, Some(3)),
                (Some(3), Some(4)),
            ]
        );
    }

    #[test]
    fn test_separate_blocks_are_counted_independently() {
        let ops = [
            Op::Delete("a"),
            Op::Equal("mid"),
            Op::Insert("b"),
            Op::Insert("c"),
        ];
        let grouped = group(&ops);
        assert_eq!(grouped.blocks, 2);
        assert_eq!(grouped.stats, DiffStats::new(2, 1, 0));
    }

    #[test]
    fn test_without_word_differ_counts_but_skips_spans() {
        let ops = [Op::Delete("a b"), Op::Insert("a c")];
        let grouped = group_blocks(&ops, None::<&MyersDiffer>);
        assert_eq!(grouped.stats, DiffStats::new(0, 0, 1));
        assert!(grouped.lines.iter().all(|l| l.word_spans.is_none()));
    }

    #[test]
    fn test_all_equal_has_no_blocks() {
        let grouped = group(&[Op::Equal("a"), Op::Equal("b")]);
        assert_eq!(grouped.blocks, 0);
        assert!(grouped.stats.is_zero());
        assert_eq!(grouped.lines.len(), 2);
    }
}
