//! Generic sequence alignment.
//!
//! [`SequenceDiffer`] turns two token sequences into an ordered edit script of
//! [`Op`]s. Replaying `Equal` + `Delete` ops yields the old sequence and
//! `Equal` + `Insert` ops yields the new one. Tokens are matched by position
//! through a real alignment, so repeated tokens never confuse the result.
//!
//! [`MyersDiffer`] is the production implementation. It delegates the
//! alignment to `similar` and adds a size cap: above `max_len` tokens on either
//! side it returns a coarse replace (everything deleted, then everything
//! inserted) instead of running the O(N·D) search.

use crate::config::DiffAlgorithm;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// One step of an edit script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op<T> {
    Equal(T),
    Insert(T),
    Delete(T),
}

impl<T> Op<T> {
    pub fn value(&self) -> &T {
        match self {
            Op::Equal(v) | Op::Insert(v) | Op::Delete(v) => v,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Op::Equal(_))
    }
}

/// Edit script plus how it was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<T> {
    pub ops: Vec<Op<T>>,
    /// True when the size cap tripped and `ops` is a single replace block
    pub coarse: bool,
}

impl<T> Alignment<T> {
    /// Number of non-equal ops.
    pub fn edit_count(&self) -> usize {
        self.ops.iter().filter(|op| !op.is_equal()).count()
    }
}

/// Computes an edit script between two token sequences.
pub trait SequenceDiffer<T> {
    fn diff(&self, old: &[T], new: &[T]) -> Alignment<T>;
}

/// Myers-family differ backed by `similar`, with a hard size cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MyersDiffer {
    algorithm: DiffAlgorithm,
    max_len: usize,
    timeout: Option<Duration>,
}

impl MyersDiffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            algorithm: DiffAlgorithm::Myers,
            max_len,
            timeout: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Bound the wall-clock time of one alignment. When the deadline passes
    /// `similar` finishes with a valid but possibly non-minimal script.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn exceeds_cap(&self, old_len: usize, new_len: usize) -> bool {
        old_len > self.max_len || new_len > self.max_len
    }
}

impl<T> SequenceDiffer<T> for MyersDiffer
where
    T: Clone + Eq + Hash + Ord,
{
    fn diff(&self, old: &[T], new: &[T]) -> Alignment<T> {
        if old == new {
            return Alignment {
                ops: old.iter().cloned().map(Op::Equal).collect(),
                coarse: false,
            };
        }

        if self.exceeds_cap(old.len(), new.len()) {
            return Alignment {
                ops: coarse_replace(old, new),
                coarse: true,
            };
        }

        let deadline = self.timeout.map(|t| Instant::now() + t);
        let diff_ops =
            similar::capture_diff_slices_deadline(self.algorithm.into(), old, new, deadline);

        let mut ops = Vec::with_capacity(old.len().max(new.len()));
        for diff_op in &diff_ops {
            let (tag, old_range, new_range) = diff_op.as_tag_tuple();
            match tag {
                similar::DiffTag::Equal => {
                    ops.extend(old[old_range].iter().cloned().map(Op::Equal));
                }
                similar::DiffTag::Delete => {
                    ops.extend(old[old_range].iter().cloned().map(Op::Delete));
                }
                similar::DiffTag::Insert => {
                    ops.extend(new[new_range].iter().cloned().map(Op::Insert));
                }
                similar::DiffTag::Replace => {
                    ops.extend(old[old_range].iter().cloned().map(Op::Delete));
                    ops.extend(new[new_range].iter().cloned().map(Op::Insert));
                }
            }
        }

        Alignment { ops, coarse: false }
    }
}

/// Everything in `old` deleted, then everything in `new` inserted.
pub fn coarse_replace<T: Clone>(old: &[T], new: &[T]) -> Vec<Op<T>> {
    old.iter()
        .cloned()
        .map(Op::Delete)
        .chain(new.iter().cloned().map(Op::Insert))
        .collect()
}

/// Tokens of the old side, recovered from `Equal` and `Delete` ops.
pub fn replay_old<T: Clone>(ops: &[Op<T>]) -> Vec<T> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Equal(v) | Op::Delete(v) => Some(v.clone()),
            Op::Insert(_) => None,
        })
        .collect()
}

/// Tokens of the new side, recovered from `Equal` and `Insert` ops.
pub fn replay_new<T: Clone>(ops: &[Op<T>]) -> Vec<T> {
    ops.iter()
        .filter_map(|op| match op {
            Op::Equal(v) | Op::Insert(v) => Some(v.clone()),
            Op::Delete(_) => None,
        })
        .collect()
}
