//! Human-readable summary renderer for document diffs.

use crate::diff::model::{DiffLine, DiffStats, DocumentDiffResult, LineKind};

/// Render a Markdown summary of a [`DocumentDiffResult`].
///
/// The summary is meant for review screens and terminals. It is built from
/// the structured result only and never changes it.
pub fn render_human_summary(diff: &DocumentDiffResult) -> String {
    let mut out = String::new();

    out.push_str("## Document Diff\n\n");

    if !diff.has_changes() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str(&format!(
        "**Fields changed**: {}  \n**Total**: {}\n\n",
        diff.fields.len(),
        stats_line(&diff.total_stats)
    ));

    for field in &diff.fields {
        out.push_str(&format!("### {}\n\n", field.label));
        out.push_str(&format!("{}\n\n", stats_line(&field.stats)));
        out.push_str("```diff\n");
        for line in &field.unified_lines {
            out.push_str(&render_line(line));
            out.push('\n');
        }
        out.push_str("```\n\n");
    }

    out
}

fn stats_line(stats: &DiffStats) -> String {
    format!(
        "+{} added, -{} removed, ~{} modified",
        stats.added, stats.removed, stats.modified
    )
}

fn render_line(line: &DiffLine) -> String {
    match line.kind {
        LineKind::Unchanged => format!("  {}", line.content),
        LineKind::Added => format!("+ {}", line.content),
        LineKind::Removed => format!("- {}", line.content),
        LineKind::Separator => format!("@@ {} @@", line.content),
    }
}
