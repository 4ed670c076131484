//! Renderers for previews and per-file diffs.
//!
//! Every renderer is a pure function of the data model: it reproduces the
//! hunks' line content and ordering exactly and never re-derives diff data.
//! Unified text is the portable interchange form; the others are
//! presentation variants over the same changes.

pub mod html;
pub mod inline;
pub mod markdown;
pub mod side_by_side;
pub mod term;
pub mod unified;

use patchgate_core::{DiffFormat, FileDiff, Preview};

/// Render a preview in the requested format.
///
/// Terminal output is colorized here; hosts that need plain terminal text
/// call [`term::render_preview`] with color off.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use patchgate_core::{DiffFormat, Preview, RiskAssessment, Summary};
/// use patchgate_render::render_preview;
///
/// let preview = Preview {
///     files: vec![],
///     summary: Summary::default(),
///     risk: RiskAssessment::from_factors(vec![]),
///     generated_at: Utc::now(),
///     warnings: vec![],
///     suggestions: vec![],
/// };
/// assert!(render_preview(&preview, DiffFormat::Unified).is_empty());
/// assert!(render_preview(&preview, DiffFormat::Markdown).contains("Change preview"));
/// ```
pub fn render_preview(preview: &Preview, format: DiffFormat) -> String {
    match format {
        DiffFormat::Unified => unified::render_preview(preview),
        DiffFormat::SideBySide => side_by_side::render_preview(preview),
        DiffFormat::Inline => inline::render_preview(preview),
        DiffFormat::Html => html::render_preview(preview),
        DiffFormat::Markdown => markdown::render_preview(preview),
        DiffFormat::Terminal => term::render_preview(preview, true),
    }
}

/// Render one file in the requested format.
pub fn render_file(diff: &FileDiff, format: DiffFormat) -> String {
    match format {
        DiffFormat::Unified => unified::render_file(diff),
        DiffFormat::SideBySide => side_by_side::render_file(diff),
        DiffFormat::Inline => inline::render_file(diff),
        DiffFormat::Html => html::render_file(diff),
        DiffFormat::Markdown => markdown::render_file(diff),
        DiffFormat::Terminal => term::render_file(diff, true),
    }
}
