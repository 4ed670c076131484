//! Structured-markup rendering for webviews.
//!
//! Emits class-annotated tables; styling is the host's problem. All change
//! content passes through [`escape_html`] so file text can never inject
//! markup.

use std::fmt::Write as _;

use patchgate_core::{ChangeKind, FileDiff, Preview};

/// Escape the five HTML special characters.
///
/// # Examples
///
/// ```
/// use patchgate_render::html::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
/// ```
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one file as an HTML fragment.
pub fn render_file(diff: &FileDiff) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<div class="file-diff">"#);
    let _ = writeln!(
        out,
        r#"<div class="file-header">{}</div>"#,
        escape_html(&diff.path.display().to_string())
    );
    for hunk in &diff.hunks {
        let _ = writeln!(out, r#"<table class="hunk">"#);
        for change in &hunk.changes {
            let class = change_class(change.kind);
            let old = change.old_line.map(|n| n.to_string()).unwrap_or_default();
            let new = change.new_line.map(|n| n.to_string()).unwrap_or_default();
            let _ = writeln!(
                out,
                r#"<tr class="{class}"><td class="lineno">{old}</td><td class="lineno">{new}</td><td class="content">{}</td></tr>"#,
                escape_html(&change.content)
            );
        }
        let _ = writeln!(out, "</table>");
    }
    let _ = writeln!(out, "</div>");
    out
}

fn change_class(kind: ChangeKind) -> &'static str {
    match kind {
        ChangeKind::Add => "add",
        ChangeKind::Delete => "delete",
        ChangeKind::Modify => "modify",
        ChangeKind::Context => "context",
    }
}

/// Render a whole preview as an HTML fragment: summary list, risk block,
/// then per-file tables.
pub fn render_preview(preview: &Preview) -> String {
    let mut out = String::new();
    let _ = writeln!(out, r#"<div class="preview">"#);

    let s = &preview.summary;
    let _ = writeln!(out, r#"<ul class="summary">"#);
    let _ = writeln!(
        out,
        "<li>{} created, {} modified, {} deleted, {} moved</li>",
        s.files_created, s.files_modified, s.files_deleted, s.files_moved
    );
    let _ = writeln!(
        out,
        "<li>+{} / -{} lines, ~{} min review</li>",
        s.total_additions, s.total_deletions, s.estimated_review_minutes
    );
    let _ = writeln!(out, "</ul>");

    let _ = writeln!(
        out,
        r#"<div class="risk risk-{}">risk: {}</div>"#,
        preview.risk.level, preview.risk.level
    );
    for factor in &preview.risk.factors {
        let _ = writeln!(
            out,
            r#"<div class="risk-factor">{}</div>"#,
            escape_html(&factor.description)
        );
    }

    for file in &preview.files {
        out.push_str(&render_file(file));
    }
    let _ = writeln!(out, "</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchgate_core::{DiffOptions, Operation, OperationKind};
    use patchgate_diff::{build_hunks, compute_stats};
    use std::path::PathBuf;

    fn diff(original: &str, modified: &str) -> FileDiff {
        let hunks = build_hunks(original, modified, &DiffOptions::default());
        let stats = compute_stats(&hunks);
        FileDiff {
            path: PathBuf::from("f.html"),
            operation: Operation {
                id: "1".into(),
                kind: OperationKind::Update,
                path: PathBuf::from("f.html"),
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

    #[test]
    fn all_five_specials_are_escaped() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html(">"), "&gt;");
        assert_eq!(escape_html("\""), "&quot;");
        assert_eq!(escape_html("'"), "&#39;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn ampersand_escapes_before_anything_else_double_escapes() {
        // "&lt;" in the source must come out as "&amp;lt;".
        assert_eq!(escape_html("&lt;"), "&amp;lt;");
    }

    #[test]
    fn file_content_cannot_inject_markup() {
        let html = render_file(&diff("safe\n", "<script>alert(1)</script>\n"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn rows_carry_change_classes_and_line_numbers() {
        let html = render_file(&diff("a\nb\nc\n", "a\nX\nc\n"));
        assert!(html.contains(r#"<tr class="delete"><td class="lineno">2</td><td class="lineno"></td>"#));
        assert!(html.contains(r#"<tr class="add"><td class="lineno"></td><td class="lineno">2</td>"#));
        assert!(html.contains(r#"<tr class="context"><td class="lineno">1</td><td class="lineno">1</td>"#));
    }
}
