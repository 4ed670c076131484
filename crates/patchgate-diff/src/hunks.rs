use std::ops::Range;

use patchgate_core::{Change, DiffOptions, Hunk};
use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Maximum number of unchanged original lines between two changes that still
/// merge into one hunk. Tunable constant with no deeper derivation; kept at 6
/// for compatibility with existing previews.
pub const MERGE_THRESHOLD: u32 = 6;

/// Window a line-change stream for `(original, modified)` into hunks.
///
/// Walks the change stream produced by the `similar` crate with two 1-based
/// cursors and groups changes into hunks with `options.context_lines` of
/// surrounding context. Changes whose original-side positions are within
/// [`MERGE_THRESHOLD`] unchanged lines of each other share a hunk.
///
/// `options` must already be validated; this function never fails.
///
/// # Examples
///
/// ```
/// use patchgate_core::{ChangeKind, DiffOptions};
/// use patchgate_diff::build_hunks;
///
/// let hunks = build_hunks("a\nb\nc\n", "a\nX\nc\n", &DiffOptions::default());
/// assert_eq!(hunks.len(), 1);
/// assert_eq!(hunks[0].additions, 1);
/// assert_eq!(hunks[0].deletions, 1);
/// assert_eq!(hunks[0].changes[0].kind, ChangeKind::Context);
/// ```
pub fn build_hunks(original: &str, modified: &str, options: &DiffOptions) -> Vec<Hunk> {
    let old_lines: Vec<&str> = original.lines().collect();
    let new_lines: Vec<&str> = modified.lines().collect();

    let ops = if options.ignore_whitespace {
        let old_keys: Vec<&str> = old_lines.iter().map(|l| l.trim()).collect();
        let new_keys: Vec<&str> = new_lines.iter().map(|l| l.trim()).collect();
        capture_diff_slices(Algorithm::Myers, &old_keys, &new_keys)
    } else {
        capture_diff_slices(Algorithm::Myers, &old_lines, &new_lines)
    };

    let mut builder = HunkBuilder::new(&old_lines, options.context_lines);
    for op in ops {
        match op.tag() {
            DiffTag::Equal => builder.equal(op.old_range().len()),
            DiffTag::Delete => builder.removed(op.old_range()),
            DiffTag::Insert => builder.added(&new_lines, op.new_range()),
            DiffTag::Replace => {
                builder.removed(op.old_range());
                builder.added(&new_lines, op.new_range());
            }
        }
    }
    builder.finish()
}

/// Stream-walking state for hunk construction.
struct HunkBuilder<'a> {
    old_lines: &'a [&'a str],
    context_lines: u32,
    hunks: Vec<Hunk>,
    current: Option<Hunk>,
    /// 1-based cursor into the original text.
    line_original: u32,
    /// 1-based cursor into the modified text.
    line_modified: u32,
    /// Value of `line_original` immediately after the last appended change.
    /// The gap to the current cursor is the count of unchanged lines between.
    last_change_cursor: u32,
    /// Unchanged lines seen since the last change (or since stream start).
    /// Caps leading context so a large `context_lines` cannot reach back into
    /// the previous hunk.
    equal_since: u32,
}

impl<'a> HunkBuilder<'a> {
    fn new(old_lines: &'a [&'a str], context_lines: u32) -> Self {
        Self {
            old_lines,
            context_lines,
            hunks: Vec::new(),
            current: None,
            line_original: 1,
            line_modified: 1,
            last_change_cursor: 1,
            equal_since: 0,
        }
    }

    /// Advance both cursors over an equal run, keeping lines that fall inside
    /// the open hunk's trailing context window.
    fn equal(&mut self, count: usize) {
        for _ in 0..count {
            if let Some(hunk) = self.current.as_mut() {
                if self.line_original <= hunk.end_line {
                    hunk.changes.push(Change::context(
                        self.line_original,
                        self.line_modified,
                        self.old_lines[(self.line_original - 1) as usize],
                    ));
                }
            }
            self.line_original += 1;
            self.line_modified += 1;
            self.equal_since += 1;
        }
    }

    /// Consume a removed segment as `delete` changes.
    fn removed(&mut self, range: Range<usize>) {
        self.open_or_merge();
        let Some(hunk) = self.current.as_mut() else {
            return;
        };
        for idx in range {
            hunk.changes.push(Change::delete(self.line_original, self.old_lines[idx]));
            hunk.deletions += 1;
            self.line_original += 1;
        }
        self.last_change_cursor = self.line_original;
        hunk.end_line = self.line_original - 1 + self.context_lines;
        self.equal_since = 0;
    }

    /// Consume an added segment as `add` changes. Additions advance only the
    /// modified-side cursor; they never widen the original-side gap.
    fn added(&mut self, new_lines: &[&str], range: Range<usize>) {
        self.open_or_merge();
        let Some(hunk) = self.current.as_mut() else {
            return;
        };
        for idx in range {
            hunk.changes.push(Change::add(self.line_modified, new_lines[idx]));
            hunk.additions += 1;
            self.line_modified += 1;
        }
        self.last_change_cursor = self.line_original;
        hunk.end_line = self.line_original - 1 + self.context_lines;
        self.equal_since = 0;
    }

    /// Before appending changes: open a fresh hunk when none is open or the
    /// original-side gap exceeds [`MERGE_THRESHOLD`]; otherwise backfill any
    /// equal lines the trailing window skipped, so merged hunks stay
    /// contiguous.
    fn open_or_merge(&mut self) {
        let split = match &self.current {
            None => true,
            Some(_) => self.line_original - self.last_change_cursor > MERGE_THRESHOLD,
        };

        if split {
            self.flush();
            let lead = self
                .context_lines
                .min(self.equal_since)
                .min(self.line_original - 1);
            let start = self.line_original - lead;
            let mut hunk = Hunk {
                start_line: start,
                end_line: start,
                changes: Vec::new(),
                additions: 0,
                deletions: 0,
            };
            for k in 0..lead {
                let old = start + k;
                let new = self.line_modified - lead + k;
                hunk.changes
                    .push(Change::context(old, new, self.old_lines[(old - 1) as usize]));
            }
            self.current = Some(hunk);
        } else if let Some(hunk) = self.current.as_mut() {
            for old in (hunk.end_line + 1)..self.line_original {
                let new = self.line_modified - (self.line_original - old);
                hunk.changes
                    .push(Change::context(old, new, self.old_lines[(old - 1) as usize]));
            }
        }
    }

    /// Close the open hunk. Hunks with zero changes are never emitted, and
    /// `end_line` is clamped to the original text (a trailing window past EOF
    /// has no lines to show).
    fn flush(&mut self) {
        if let Some(mut hunk) = self.current.take() {
            if hunk.additions + hunk.deletions == 0 {
                return;
            }
            let total = self.old_lines.len() as u32;
            hunk.end_line = hunk.end_line.min(total).max(hunk.start_line);
            self.hunks.push(hunk);
        }
    }

    fn finish(mut self) -> Vec<Hunk> {
        self.flush();
        self.hunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use patchgate_core::ChangeKind;

    fn default_options() -> DiffOptions {
        DiffOptions::default()
    }

    fn numbered(prefix: &str, count: u32) -> String {
        let mut text = String::new();
        for i in 1..=count {
            text.push_str(&format!("{prefix}{i}\n"));
        }
        text
    }

    #[test]
    fn single_line_replacement() {
        let hunks = build_hunks("a\nb\nc\n", "a\nX\nc\n", &default_options());
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.start_line, 1);
        assert_eq!(hunk.end_line, 3);
        assert_eq!(hunk.additions, 1);
        assert_eq!(hunk.deletions, 1);

        let kinds: Vec<ChangeKind> = hunk.changes.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChangeKind::Context,
                ChangeKind::Delete,
                ChangeKind::Add,
                ChangeKind::Context,
            ]
        );
        assert_eq!(hunk.changes[0].content, "a");
        assert_eq!(hunk.changes[1].content, "b");
        assert_eq!(hunk.changes[2].content, "X");
        assert_eq!(hunk.changes[3].content, "c");
        assert_eq!(hunk.changes[2].old_line, None);
        assert_eq!(hunk.changes[2].new_line, Some(2));
    }

    #[test]
    fn identical_texts_produce_no_hunks() {
        let text = numbered("line", 10);
        assert!(build_hunks(&text, &text, &default_options()).is_empty());
        assert!(build_hunks("", "", &default_options()).is_empty());
    }

    #[test]
    fn empty_original_is_all_additions() {
        let hunks = build_hunks("", "a\nb\nc\n", &default_options());
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.start_line, 1);
        assert_eq!(hunk.end_line, 1);
        assert_eq!(hunk.additions, 3);
        assert_eq!(hunk.deletions, 0);
        assert!(hunk.changes.iter().all(|c| c.kind == ChangeKind::Add));
        assert_eq!(hunk.changes[0].new_line, Some(1));
        assert_eq!(hunk.changes[2].new_line, Some(3));
    }

    #[test]
    fn empty_modified_is_all_deletions() {
        let hunks = build_hunks("a\nb\n", "", &default_options());
        assert_eq!(hunks.len(), 1);
        let hunk = &hunks[0];
        assert_eq!(hunk.deletions, 2);
        assert_eq!(hunk.additions, 0);
        assert_eq!(hunk.start_line, 1);
        assert_eq!(hunk.end_line, 2);
        assert!(hunk.changes.iter().all(|c| c.kind == ChangeKind::Delete));
    }

    /// Two clusters separated by exactly 6 unchanged lines merge; 7 split.
    #[test]
    fn merge_threshold_boundary() {
        // 20 lines; replace line 5 and line 12 (6 unchanged lines between).
        let original = numbered("line", 20);
        let near = original
            .replace("line5\n", "FIVE\n")
            .replace("line12\n", "TWELVE\n");
        let hunks = build_hunks(&original, &near, &default_options());
        assert_eq!(hunks.len(), 1, "6 unchanged lines should merge");

        // Replace line 5 and line 13 (7 unchanged lines between).
        let far = original
            .replace("line5\n", "FIVE\n")
            .replace("line13\n", "THIRTEEN\n");
        let hunks = build_hunks(&original, &far, &default_options());
        assert_eq!(hunks.len(), 2, "7 unchanged lines should split");
        assert_eq!(hunks[1].start_line, 10);
    }

    #[test]
    fn merged_hunk_is_contiguous_on_the_original_axis() {
        let original = numbered("line", 20);
        let modified = original
            .replace("line5\n", "FIVE\n")
            .replace("line12\n", "TWELVE\n");
        let hunks = build_hunks(&original, &modified, &default_options());
        assert_eq!(hunks.len(), 1);

        let old_lines: Vec<u32> = hunks[0].changes.iter().filter_map(|c| c.old_line).collect();
        for pair in old_lines.windows(2) {
            assert_eq!(pair[1], pair[0] + 1, "hole in hunk: {old_lines:?}");
        }
    }

    #[test]
    fn leading_context_clamps_at_file_start() {
        let original = "a\nb\nc\nd\n";
        let modified = "X\nb\nc\nd\n";
        let hunks = build_hunks(original, modified, &default_options());
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].start_line, 1);
        assert_eq!(hunks[0].changes[0].kind, ChangeKind::Delete);
    }

    #[test]
    fn trailing_context_clamps_at_file_end() {
        let original = "a\nb\nc\n";
        let modified = "a\nb\nX\n";
        let hunks = build_hunks(original, modified, &default_options());
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].end_line, 3);
    }

    #[test]
    fn zero_context_keeps_only_changed_lines() {
        let options = DiffOptions {
            context_lines: 0,
            ..DiffOptions::default()
        };
        let hunks = build_hunks("a\nb\nc\n", "a\nX\nc\n", &options);
        assert_eq!(hunks.len(), 1);
        assert_eq!(hunks[0].changes.len(), 2);
        assert_eq!(hunks[0].start_line, 2);
        assert_eq!(hunks[0].end_line, 2);
    }

    #[test]
    fn counters_match_change_kinds() {
        let original = numbered("line", 30);
        let modified = original
            .replace("line3\n", "A\nB\n")
            .replace("line20\n", "")
            .replace("line25\n", "C\n");
        let hunks = build_hunks(&original, &modified, &default_options());
        for hunk in &hunks {
            let adds = hunk
                .changes
                .iter()
                .filter(|c| c.kind == ChangeKind::Add)
                .count() as u32;
            let dels = hunk
                .changes
                .iter()
                .filter(|c| c.kind == ChangeKind::Delete)
                .count() as u32;
            assert_eq!(hunk.additions, adds);
            assert_eq!(hunk.deletions, dels);
            assert!(hunk.additions + hunk.deletions > 0);
        }
    }

    /// Additions at distant insertion points split on the original-line gap.
    #[test]
    fn pure_additions_split_by_original_gap() {
        let original = numbered("line", 20);
        // Insert after line 2 and after line 18: gap of 16 original lines.
        let modified = original
            .replace("line2\n", "line2\nNEW_A\n")
            .replace("line18\n", "line18\nNEW_B\n");
        let hunks = build_hunks(&original, &modified, &default_options());
        assert_eq!(hunks.len(), 2);
        assert_eq!(hunks[0].additions, 1);
        assert_eq!(hunks[1].additions, 1);
        assert_eq!(hunks[0].deletions, 0);
    }

    #[test]
    fn rebuilding_is_deterministic() {
        let original = numbered("alpha", 40);
        let modified = original
            .replace("alpha7\n", "BETA\n")
            .replace("alpha22\n", "alpha22\nGAMMA\n");
        let first = build_hunks(&original, &modified, &default_options());
        let second = build_hunks(&original, &modified, &default_options());
        assert_eq!(first, second);
    }

    #[test]
    fn ignore_whitespace_suppresses_indentation_changes() {
        let original = "fn main() {\n    let x = 1;\n}\n";
        let reindented = "fn main() {\n        let x = 1;\n}\n";

        let strict = build_hunks(original, reindented, &default_options());
        assert_eq!(strict.len(), 1);

        let relaxed = DiffOptions {
            ignore_whitespace: true,
            ..DiffOptions::default()
        };
        assert!(build_hunks(original, reindented, &relaxed).is_empty());
    }

    #[test]
    fn context_lines_carry_both_numberings() {
        let original = "a\nb\nc\nd\ne\n";
        let modified = "a\nb\nX\nc\nd\ne\n";
        let hunks = build_hunks(original, modified, &default_options());
        assert_eq!(hunks.len(), 1);
        for change in &hunks[0].changes {
            match change.kind {
                ChangeKind::Context => {
                    assert!(change.old_line.is_some());
                    assert!(change.new_line.is_some());
                }
                ChangeKind::Add => assert!(change.old_line.is_none()),
                ChangeKind::Delete => assert!(change.new_line.is_none()),
                ChangeKind::Modify => unreachable!("builder never emits modify"),
            }
        }
        // The context after the insertion is shifted on the modified side.
        let after = hunks[0]
            .changes
            .iter()
            .find(|c| c.content == "c")
            .unwrap();
        assert_eq!(after.old_line, Some(3));
        assert_eq!(after.new_line, Some(4));
    }
}
