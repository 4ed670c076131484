//! Unified diff text, the portable interchange format.
//!
//! Output follows the classic layout: `--- a/<path>` / `+++ b/<path>` file
//! headers, `@@ -old_start,old_len +new_start,new_len @@` hunk headers, then
//! one prefixed line per change. `old_len` counts changes that exist on the
//! original side (everything but additions), `new_len` the modified side
//! (everything but deletions). Standard patch tools apply the result.

use std::fmt::Write as _;

use patchgate_core::{ChangeKind, FileDiff, Hunk, Preview};

/// Render one file as a unified diff.
///
/// # Examples
///
/// ```
/// use patchgate_core::{DiffOptions, FileDiff, Operation, OperationKind, Stats};
/// use patchgate_diff::{build_hunks, compute_stats};
/// use std::path::PathBuf;
///
/// let hunks = build_hunks("a\nb\nc\n", "a\nX\nc\n", &DiffOptions::default());
/// let stats = compute_stats(&hunks);
/// let diff = FileDiff {
///     path: PathBuf::from("f.txt"),
///     operation: Operation {
///         id: "1".into(),
///         kind: OperationKind::Update,
///         path: PathBuf::from("f.txt"),
///         content: Some("a\nX\nc\n".into()),
///         description: None,
///     },
///     hunks,
///     language: None,
///     original: "a\nb\nc\n".into(),
///     modified: "a\nX\nc\n".into(),
///     stats,
/// };
/// let text = patchgate_render::unified::render_file(&diff);
/// assert!(text.starts_with("--- a/f.txt\n+++ b/f.txt\n@@ -1,3 +1,3 @@\n"));
/// ```
pub fn render_file(diff: &FileDiff) -> String {
    let mut out = String::new();
    let path = diff.path.display();
    let _ = writeln!(out, "--- a/{path}");
    let _ = writeln!(out, "+++ b/{path}");
    for hunk in &diff.hunks {
        render_hunk(hunk, &mut out);
    }
    out
}

/// Render every file in a preview as one concatenated unified diff.
pub fn render_preview(preview: &Preview) -> String {
    preview.files.iter().map(render_file).collect()
}

pub(crate) fn change_prefix(kind: ChangeKind) -> char {
    match kind {
        ChangeKind::Add => '+',
        ChangeKind::Delete => '-',
        ChangeKind::Modify => '!',
        ChangeKind::Context => ' ',
    }
}

fn render_hunk(hunk: &Hunk, out: &mut String) {
    let (old_start, old_len, new_start, new_len) = hunk_ranges(hunk);
    let _ = writeln!(out, "@@ -{old_start},{old_len} +{new_start},{new_len} @@");
    for change in &hunk.changes {
        out.push(change_prefix(change.kind));
        out.push_str(&change.content);
        out.push('\n');
    }
}

/// Header ranges for a hunk. An empty side is reported as starting one line
/// before the hunk, the convention patch tools expect for pure insertions
/// and deletions.
pub(crate) fn hunk_ranges(hunk: &Hunk) -> (u32, usize, u32, usize) {
    let old_len = hunk
        .changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Add)
        .count();
    let new_len = hunk
        .changes
        .iter()
        .filter(|c| c.kind != ChangeKind::Delete)
        .count();

    let old_start = if old_len == 0 {
        hunk.start_line.saturating_sub(1)
    } else {
        hunk.start_line
    };
    // Context and add changes always carry a modified-side number, so the
    // fallback only fires for hunks with nothing on the new side.
    let new_start = hunk
        .changes
        .iter()
        .find_map(|c| c.new_line)
        .unwrap_or_else(|| hunk.start_line.saturating_sub(1));

    (old_start, old_len, new_start, new_len)
}
