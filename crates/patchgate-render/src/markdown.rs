//! Plain-markdown report, suitable for PR comments and chat output.

use std::fmt::Write as _;

use patchgate_core::{FileDiff, Preview};

use crate::unified;

/// Render one file as a heading plus a fenced `diff` block.
pub fn render_file(diff: &FileDiff) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "### `{}`", diff.path.display());
    let _ = writeln!(
        out,
        "+{} / -{} ({}% of the file changed)\n",
        diff.stats.additions, diff.stats.deletions, diff.stats.percentage_changed
    );
    if diff.hunks.is_empty() {
        out.push_str("No content changes.\n");
        return out;
    }
    out.push_str("```diff\n");
    out.push_str(&unified::render_file(diff));
    out.push_str("```\n");
    out
}

/// Render a whole preview as a markdown report: summary, risk, advice,
/// then per-file diffs.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use patchgate_core::{Preview, RiskAssessment, Summary};
///
/// let preview = Preview {
///     files: vec![],
///     summary: Summary::default(),
///     risk: RiskAssessment::from_factors(vec![]),
///     generated_at: Utc::now(),
///     warnings: vec![],
///     suggestions: vec![],
/// };
/// let report = patchgate_render::markdown::render_preview(&preview);
/// assert!(report.starts_with("## Change preview\n"));
/// assert!(report.contains("**Risk**: low"));
/// ```
pub fn render_preview(preview: &Preview) -> String {
    let mut out = String::from("## Change preview\n\n");

    let s = &preview.summary;
    let _ = writeln!(
        out,
        "{} created, {} modified, {} deleted, {} moved — +{} / -{} lines, ~{} min review\n",
        s.files_created,
        s.files_modified,
        s.files_deleted,
        s.files_moved,
        s.total_additions,
        s.total_deletions,
        s.estimated_review_minutes
    );

    let _ = writeln!(out, "**Risk**: {}", preview.risk.level);
    for factor in &preview.risk.factors {
        let _ = writeln!(out, "- [{}] {}", factor.kind, factor.description);
    }
    if !preview.risk.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &preview.risk.recommendations {
            let _ = writeln!(out, "- {rec}");
        }
    }

    if !preview.warnings.is_empty() {
        out.push_str("\nWarnings:\n");
        for warning in &preview.warnings {
            let _ = writeln!(out, "- {warning}");
        }
    }
    if !preview.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in &preview.suggestions {
            let _ = writeln!(out, "- {suggestion}");
        }
    }

    for file in &preview.files {
        out.push('\n');
        out.push_str(&render_file(file));
    }
    out
}
