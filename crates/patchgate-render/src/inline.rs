//! Single-column view with both line number gutters.

use std::fmt::Write as _;

use patchgate_core::{FileDiff, Preview};

use crate::unified::change_prefix;

/// Render one file with old/new line number gutters.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Change, Hunk};
///
/// let changes = vec![
///     Change::context(1, 1, "a"),
///     Change::delete(2, "b"),
///     Change::add(2, "X"),
/// ];
/// let hunk = Hunk { start_line: 1, end_line: 2, changes, additions: 1, deletions: 1 };
/// let text = patchgate_render::inline::render_changes(&[hunk]);
/// assert!(text.contains("    2        - b"));
/// assert!(text.contains("          2  + X"));
/// ```
pub fn render_file(diff: &FileDiff) -> String {
    let mut out = format!("=== {}", diff.path.display());
    if let Some(language) = &diff.language {
        let _ = write!(out, " ({language})");
    }
    out.push('\n');
    out.push_str(&render_changes(&diff.hunks));
    out
}

/// Render hunks without the file banner.
pub fn render_changes(hunks: &[patchgate_core::Hunk]) -> String {
    let mut out = String::new();
    for (i, hunk) in hunks.iter().enumerate() {
        if i > 0 {
            out.push_str("  ...\n");
        }
        for change in &hunk.changes {
            let old = gutter(change.old_line);
            let new = gutter(change.new_line);
            let prefix = change_prefix(change.kind);
            let _ = writeln!(out, "{old} {new}  {prefix} {}", change.content);
        }
    }
    out
}

fn gutter(line: Option<u32>) -> String {
    match line {
        Some(n) => format!("{n:>5}"),
        None => " ".repeat(5),
    }
}

/// Render every file in a preview.
pub fn render_preview(preview: &Preview) -> String {
    preview.files.iter().map(render_file).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchgate_core::{DiffOptions, Operation, OperationKind};
    use patchgate_diff::{build_hunks, compute_stats};
    use std::path::PathBuf;

    fn diff(path: &str, original: &str, modified: &str) -> FileDiff {
        let hunks = build_hunks(original, modified, &DiffOptions::default());
        let stats = compute_stats(&hunks);
        FileDiff {
            path: PathBuf::from(path),
            operation: Operation {
                id: path.into(),
                kind: OperationKind::Update,
                path: PathBuf::from(path),
                content: Some(modified.to_string()),
                description: None,
            },
            hunks,
            language: patchgate_diff::detect_language(&PathBuf::from(path))
                .map(str::to_string),
            original: original.to_string(),
            modified: modified.to_string(),
            stats,
        }
    }

    #[test]
    fn both_gutters_are_present_for_context() {
        let text = render_file(&diff("f.txt", "a\nb\nc\n", "a\nX\nc\n"));
        assert!(text.contains("    1     1    a"));
    }

    #[test]
    fn deletion_has_only_the_old_gutter() {
        let text = render_file(&diff("f.txt", "a\nb\nc\n", "a\nc\n"));
        assert!(text.contains("    2        - b"), "got: {text}");
    }

    #[test]
    fn banner_carries_the_language_tag() {
        let text = render_file(&diff("src/lib.rs", "a\n", "b\n"));
        assert!(text.starts_with("=== src/lib.rs (rust)\n"));
    }

    #[test]
    fn hunks_are_separated_by_ellipsis() {
        let original: String = (1..=30).map(|i| format!("line{i}\n")).collect();
        let modified = original
            .replace("line2\n", "changed2\n")
            .replace("line28\n", "changed28\n");
        let text = render_file(&diff("f.txt", &original, &modified));
        assert_eq!(text.matches("  ...\n").count(), 1);
    }
}
