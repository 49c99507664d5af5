//! Context collapsing for long unchanged runs.

use crate::config::CollapsePolicy;
use crate::diff::model::{DiffLine, LineKind};

/// Replace the middle of every unchanged run longer than `policy.threshold`
/// with a single separator, keeping `policy.context_lines` rows at each edge.
///
/// Runs at or below the threshold, and every changed row, pass through as-is.
/// A disabled policy returns the input unchanged.
pub fn collapse_context(lines: Vec<DiffLine>, policy: &CollapsePolicy) -> Vec<DiffLine> {
    if !policy.enabled {
        return lines;
    }

    let mut out = Vec::with_capacity(lines.len());
    let mut run: Vec<DiffLine> = Vec::new();

    for line in lines {
        if line.kind == LineKind::Unchanged {
            run.push(line);
        } else {
            flush_run(&mut run, policy, &mut out);
            out.push(line);
        }
    }
    flush_run(&mut run, policy, &mut out);

    out
}

fn flush_run(run: &mut Vec<DiffLine>, policy: &CollapsePolicy, out: &mut Vec<DiffLine>) {
    let len = run.len();
    let context = policy.context_lines;

    if len <= policy.threshold || len <= context * 2 {
        out.append(run);
        return;
    }

    let hidden = len - context * 2;
    let mut drained = run.drain(..);
    out.extend(drained.by_ref().take(context));
    out.push(DiffLine::separator(hidden));
    out.extend(drained.skip(hidden));
}

/// Length of the longest run of consecutive unchanged rows.
pub fn longest_unchanged_run(lines: &[DiffLine]) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for line in lines {
        if line.kind == LineKind::Unchanged {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}
