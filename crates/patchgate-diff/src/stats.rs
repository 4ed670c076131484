use patchgate_core::{Hunk, Stats};

/// Smoothing constant for the bounded change-percentage heuristic. Tunable,
/// kept at 100 for compatibility with existing previews.
pub const PERCENTAGE_SMOOTHING: u32 = 100;

/// Reduce a file's hunks to additive counters.
///
/// Pure function of hunk shape: it never reads the original or modified text.
/// `modifications` models a balanced add/delete pair within one hunk as a
/// single modify, summing `min(additions, deletions)` per hunk.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Change, DiffOptions, Hunk};
/// use patchgate_diff::{build_hunks, compute_stats};
///
/// let hunks = build_hunks("a\nb\nc\n", "a\nX\nc\n", &DiffOptions::default());
/// let stats = compute_stats(&hunks);
/// assert_eq!(stats.additions, 1);
/// assert_eq!(stats.deletions, 1);
/// assert_eq!(stats.modifications, 1);
/// assert_eq!(stats.total_changes, 2);
/// ```
pub fn compute_stats(hunks: &[Hunk]) -> Stats {
    let mut additions: u32 = 0;
    let mut deletions: u32 = 0;
    let mut modifications: u32 = 0;

    for hunk in hunks {
        additions += hunk.additions;
        deletions += hunk.deletions;
        modifications += hunk.additions.min(hunk.deletions);
    }

    let total_changes = additions + deletions;
    Stats {
        additions,
        deletions,
        modifications,
        total_changes,
        percentage_changed: percentage_changed(total_changes),
    }
}

/// `round(100 * total / (total + K))` for K = [`PERCENTAGE_SMOOTHING`].
///
/// A one-line change reads as 1%, not 0%; very large diffs asymptote toward
/// 100%. Deliberately a bounded heuristic, not a file-size ratio.
fn percentage_changed(total_changes: u32) -> u32 {
    if total_changes == 0 {
        return 0;
    }
    let total = f64::from(total_changes);
    (100.0 * total / (total + f64::from(PERCENTAGE_SMOOTHING))).round() as u32
}
