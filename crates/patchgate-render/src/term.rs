//! Colorized terminal rendering with raw ANSI escapes.

use std::fmt::Write as _;

use patchgate_core::{ChangeKind, FileDiff, Preview, RiskLevel};

use crate::unified::hunk_ranges;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Render one file with colored prefixes, or plain text when `use_color`
/// is off.
pub fn render_file(diff: &FileDiff, use_color: bool) -> String {
    let mut out = String::new();
    if use_color {
        let _ = writeln!(out, "{BOLD}{}{RESET}", diff.path.display());
    } else {
        let _ = writeln!(out, "{}", diff.path.display());
    }

    for hunk in &diff.hunks {
        let (old_start, old_len, new_start, new_len) = hunk_ranges(hunk);
        let header = format!("@@ -{old_start},{old_len} +{new_start},{new_len} @@");
        if use_color {
            let _ = writeln!(out, "{CYAN}{header}{RESET}");
        } else {
            let _ = writeln!(out, "{header}");
        }
        for change in &hunk.changes {
            let (prefix, color) = match change.kind {
                ChangeKind::Add => ('+', GREEN),
                ChangeKind::Delete => ('-', RED),
                ChangeKind::Modify => ('!', YELLOW),
                ChangeKind::Context => (' ', ""),
            };
            if use_color && !color.is_empty() {
                let _ = writeln!(out, "{color}{prefix}{}{RESET}", change.content);
            } else {
                let _ = writeln!(out, "{prefix}{}", change.content);
            }
        }
    }
    out
}

/// Render the whole preview: a header, per-file diffs, summary, and the
/// risk assessment.
pub fn render_preview(preview: &Preview, use_color: bool) -> String {
    let mut out = String::new();
    for file in &preview.files {
        out.push_str(&render_file(file, use_color));
        out.push('\n');
    }

    let s = &preview.summary;
    let counts = format!(
        "{} created, {} modified, {} deleted, {} moved",
        s.files_created, s.files_modified, s.files_deleted, s.files_moved
    );
    if use_color {
        let _ = writeln!(
            out,
            "{counts} ({GREEN}+{}{RESET} {RED}-{}{RESET}), ~{} min review",
            s.total_additions, s.total_deletions, s.estimated_review_minutes
        );
    } else {
        let _ = writeln!(
            out,
            "{counts} (+{} -{}), ~{} min review",
            s.total_additions, s.total_deletions, s.estimated_review_minutes
        );
    }

    let level = preview.risk.level;
    if use_color {
        let _ = writeln!(out, "risk: {}{level}{RESET}", level_color(level));
    } else {
        let _ = writeln!(out, "risk: {level}");
    }
    for factor in &preview.risk.factors {
        let _ = writeln!(out, "  - {}", factor.description);
    }
    for warning in &preview.warnings {
        if use_color {
            let _ = writeln!(out, "{YELLOW}warning{RESET}: {warning}");
        } else {
            let _ = writeln!(out, "warning: {warning}");
        }
    }
    for suggestion in &preview.suggestions {
        let _ = writeln!(out, "suggestion: {suggestion}");
    }
    out
}

fn level_color(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => GREEN,
        RiskLevel::Medium => YELLOW,
        RiskLevel::High => RED,
        RiskLevel::Critical => "\x1b[1m\x1b[31m",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchgate_core::{
        DiffOptions, Operation, OperationKind, RiskAssessment, Summary,
    };
    use patchgate_diff::{build_hunks, compute_stats};
    use std::path::PathBuf;

    fn diff(original: &str, modified: &str) -> FileDiff {
        let hunks = build_hunks(original, modified, &DiffOptions::default());
        let stats = compute_stats(&hunks);
        FileDiff {
            path: PathBuf::from("f.txt"),
            operation: Operation {
                id: "1".into(),
                kind: OperationKind::Update,
                path: PathBuf::from("f.txt"),
                content: Some(modified.to_string()),
                description: None,
            },
            hunks,
            language: None,
            original: original.to_string(),
            modified: modified.to_string(),
            stats,
        }
    }

    fn preview(files: Vec<FileDiff>) -> Preview {
        Preview {
            files,
            summary: Summary::default(),
            risk: RiskAssessment::from_factors(vec![]),
            generated_at: chrono::Utc::now(),
            warnings: vec![],
            suggestions: vec![],
        }
    }

    #[test]
    fn colored_output_wraps_adds_and_deletes() {
        let text = render_file(&diff("a\nb\nc\n", "a\nX\nc\n"), true);
        assert!(text.contains("\x1b[32m+X\x1b[0m"));
        assert!(text.contains("\x1b[31m-b\x1b[0m"));
        assert!(text.contains("\x1b[36m@@ -1,3 +1,3 @@\x1b[0m"));
    }

    #[test]
    fn plain_output_has_no_escapes() {
        let text = render_preview(&preview(vec![diff("a\n", "b\n")]), false);
        assert!(!text.contains('\x1b'));
        assert!(text.contains("risk: low"));
    }

    #[test]
    fn context_lines_are_never_colored() {
        let text = render_file(&diff("a\nb\nc\n", "a\nX\nc\n"), true);
        assert!(text.contains("\n a\n"));
    }
}
