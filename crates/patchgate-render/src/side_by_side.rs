//! Two-column view: original on the left, modified on the right.
//!
//! The typed row structure is the real product here; the text rendering is a
//! convenience for terminals. Deletions pair up with the additions that
//! follow them in the same hunk so a replacement reads as one row.

use serde::Serialize;

use patchgate_core::{Change, ChangeKind, FileDiff, Preview};

/// One cell of a side-by-side row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideCell {
    /// 1-based line number on this side.
    pub line: u32,
    pub content: String,
    pub kind: ChangeKind,
}

/// One aligned row. A pure addition has no left cell, a pure deletion no
/// right cell, context both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideBySideRow {
    pub left: Option<SideCell>,
    pub right: Option<SideCell>,
}

/// Build the aligned rows for one file, in hunk order.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Change, Hunk};
/// use patchgate_render::side_by_side::hunk_rows;
///
/// let hunk = Hunk {
///     start_line: 1,
///     end_line: 1,
///     changes: vec![Change::delete(1, "b"), Change::add(1, "X")],
///     additions: 1,
///     deletions: 1,
/// };
/// let rows = hunk_rows(&hunk.changes);
/// assert_eq!(rows.len(), 1);
/// assert_eq!(rows[0].left.as_ref().unwrap().content, "b");
/// assert_eq!(rows[0].right.as_ref().unwrap().content, "X");
/// ```
pub fn file_rows(diff: &FileDiff) -> Vec<SideBySideRow> {
    diff.hunks
        .iter()
        .flat_map(|h| hunk_rows(&h.changes))
        .collect()
}

/// Align one hunk's change list into rows.
pub fn hunk_rows(changes: &[Change]) -> Vec<SideBySideRow> {
    let mut rows = Vec::with_capacity(changes.len());
    // Deletions wait here until a matching addition or a context line
    // arrives.
    let mut pending: Vec<SideCell> = Vec::new();

    for change in changes {
        match change.kind {
            ChangeKind::Delete => {
                if let Some(line) = change.old_line {
                    pending.push(SideCell {
                        line,
                        content: change.content.clone(),
                        kind: ChangeKind::Delete,
                    });
                }
            }
            ChangeKind::Add => {
                let left = if pending.is_empty() {
                    None
                } else {
                    Some(pending.remove(0))
                };
                let right = change.new_line.map(|line| SideCell {
                    line,
                    content: change.content.clone(),
                    kind: ChangeKind::Add,
                });
                rows.push(SideBySideRow { left, right });
            }
            ChangeKind::Context | ChangeKind::Modify => {
                flush_pending(&mut pending, &mut rows);
                let cell = |line: Option<u32>| {
                    line.map(|line| SideCell {
                        line,
                        content: change.content.clone(),
                        kind: change.kind,
                    })
                };
                rows.push(SideBySideRow {
                    left: cell(change.old_line),
                    right: cell(change.new_line),
                });
            }
        }
    }
    flush_pending(&mut pending, &mut rows);
    rows
}

fn flush_pending(pending: &mut Vec<SideCell>, rows: &mut Vec<SideBySideRow>) {
    for cell in pending.drain(..) {
        rows.push(SideBySideRow {
            left: Some(cell),
            right: None,
        });
    }
}

/// Fixed-width text rendering of the aligned rows.
pub fn render_file(diff: &FileDiff) -> String {
    let rows = file_rows(diff);
    let width = rows
        .iter()
        .filter_map(|r| r.left.as_ref())
        .map(|c| c.content.len())
        .max()
        .unwrap_or(0)
        .clamp(20, 60);

    let mut out = format!("=== {}\n", diff.path.display());
    for row in &rows {
        let (lno, lmark, ltext) = cell_parts(row.left.as_ref(), '-');
        let (rno, rmark, rtext) = cell_parts(row.right.as_ref(), '+');
        out.push_str(&format!(
            "{lno:>5} {lmark} {ltext:<width$} | {rno:>5} {rmark} {rtext}\n"
        ));
    }
    out
}

fn cell_parts(cell: Option<&SideCell>, change_mark: char) -> (String, char, &str) {
    match cell {
        Some(c) => {
            let mark = match c.kind {
                ChangeKind::Context => ' ',
                ChangeKind::Modify => '!',
                _ => change_mark,
            };
            (c.line.to_string(), mark, c.content.as_str())
        }
        None => (String::new(), ' ', ""),
    }
}

/// Render every file in a preview, separated by file banners.
pub fn render_preview(preview: &Preview) -> String {
    preview.files.iter().map(render_file).collect()
}
