use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A proposed file mutation awaiting review.
///
/// Operations are produced by an external planning stage and are read-only
/// input to the preview pipeline.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Operation, OperationKind};
/// use std::path::PathBuf;
///
/// let op = Operation {
///     id: "op-1".into(),
///     kind: OperationKind::Create,
///     path: PathBuf::from("src/new.rs"),
///     content: Some("fn main() {}".into()),
///     description: None,
/// };
/// assert_eq!(op.kind, OperationKind::Create);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Identifier assigned by the planning stage.
    pub id: String,
    /// What the operation does to the target file.
    pub kind: OperationKind,
    /// Target path, relative to the workspace root.
    pub path: PathBuf,
    /// New content for the file, where applicable.
    #[serde(default)]
    pub content: Option<String>,
    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,
}

impl Operation {
    /// Number of lines in the proposed content, 0 when there is none.
    pub fn content_lines(&self) -> usize {
        self.content.as_deref().map_or(0, |c| c.lines().count())
    }
}

/// Kind of file mutation an [`Operation`] performs.
///
/// # Examples
///
/// ```
/// use patchgate_core::OperationKind;
///
/// let kind: OperationKind = "delete".parse().unwrap();
/// assert_eq!(kind, OperationKind::Delete);
/// assert_eq!(kind.to_string(), "delete");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Create a new file.
    Create,
    /// Replace an existing file's content.
    Update,
    /// Remove a file.
    Delete,
    /// Append content to the end of a file.
    Append,
    /// Move a file to a new path.
    Move,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Create => write!(f, "create"),
            OperationKind::Update => write!(f, "update"),
            OperationKind::Delete => write!(f, "delete"),
            OperationKind::Append => write!(f, "append"),
            OperationKind::Move => write!(f, "move"),
        }
    }
}

impl FromStr for OperationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "create" => Ok(OperationKind::Create),
            "update" => Ok(OperationKind::Update),
            "delete" => Ok(OperationKind::Delete),
            "append" => Ok(OperationKind::Append),
            "move" => Ok(OperationKind::Move),
            other => Err(format!("unknown operation kind: {other}")),
        }
    }
}

/// Kind of a single diff-displayable line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// Unchanged line kept for readability.
    Context,
    /// Line present only in the modified text.
    Add,
    /// Line present only in the original text.
    Delete,
    /// Line replaced in place (reserved for renderers that pair changes).
    Modify,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Context => write!(f, "context"),
            ChangeKind::Add => write!(f, "add"),
            ChangeKind::Delete => write!(f, "delete"),
            ChangeKind::Modify => write!(f, "modify"),
        }
    }
}

/// One diff-displayable unit inside a [`Hunk`].
///
/// A pure addition carries only a modified-side line number, a pure deletion
/// only an original-side one; context lines carry both.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Change, ChangeKind};
///
/// let add = Change::add(7, "let x = 1;");
/// assert_eq!(add.kind, ChangeKind::Add);
/// assert_eq!(add.old_line, None);
/// assert_eq!(add.new_line, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    /// Classification of the line.
    pub kind: ChangeKind,
    /// 1-based line number in the original text, if any.
    pub old_line: Option<u32>,
    /// 1-based line number in the modified text, if any.
    pub new_line: Option<u32>,
    /// Literal line content without a trailing newline.
    pub content: String,
}

impl Change {
    /// An unchanged line present in both versions.
    pub fn context(old_line: u32, new_line: u32, content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Context,
            old_line: Some(old_line),
            new_line: Some(new_line),
            content: content.into(),
        }
    }

    /// A line that exists only in the modified text.
    pub fn add(new_line: u32, content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Add,
            old_line: None,
            new_line: Some(new_line),
            content: content.into(),
        }
    }

    /// A line that exists only in the original text.
    pub fn delete(old_line: u32, content: impl Into<String>) -> Self {
        Self {
            kind: ChangeKind::Delete,
            old_line: Some(old_line),
            new_line: None,
            content: content.into(),
        }
    }
}

/// A contiguous window of changes with its position in the original text.
///
/// Changes are ordered by position of occurrence in the merged change stream.
/// `end_line` is at least the original-side line of the last change plus the
/// trailing context that was actually available.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Change, Hunk};
///
/// let hunk = Hunk {
///     start_line: 1,
///     end_line: 3,
///     changes: vec![
///         Change::context(1, 1, "a"),
///         Change::delete(2, "b"),
///         Change::add(2, "X"),
///         Change::context(3, 3, "c"),
///     ],
///     additions: 1,
///     deletions: 1,
/// };
/// assert_eq!(hunk.changes.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hunk {
    /// First original-side line covered by the hunk (1-based).
    pub start_line: u32,
    /// Last original-side line covered by the hunk.
    pub end_line: u32,
    /// Ordered changes, including context lines.
    pub changes: Vec<Change>,
    /// Number of `add` changes in the hunk.
    pub additions: u32,
    /// Number of `delete` changes in the hunk.
    pub deletions: u32,
}

/// Additive counters for one file's diff.
///
/// `percentage_changed` is a bounded heuristic, not a file-size ratio: it is
/// `round(100 * total / (total + K))` with a fixed smoothing constant, so a
/// one-line change never reads as near-0% and huge diffs asymptote to 100%.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Lines added.
    pub additions: u32,
    /// Lines deleted.
    pub deletions: u32,
    /// Balanced add/delete pairs, summed per hunk.
    pub modifications: u32,
    /// `additions + deletions`.
    pub total_changes: u32,
    /// Normalized change score in `[0, 100]`.
    pub percentage_changed: u32,
}

/// A complete diff for a single proposed operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDiff {
    /// Target path of the operation.
    pub path: PathBuf,
    /// The operation this diff previews.
    pub operation: Operation,
    /// Ordered hunks.
    pub hunks: Vec<Hunk>,
    /// Language tag derived from the file extension.
    pub language: Option<String>,
    /// Full original text, retained for exact reconstruction.
    pub original: String,
    /// Full modified text.
    pub modified: String,
    /// Aggregate counters for this file.
    pub stats: Stats,
}

impl fmt::Display for FileDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} hunks, +{}/-{})",
            self.path.display(),
            self.hunks.len(),
            self.stats.additions,
            self.stats.deletions
        )
    }
}

/// Severity of a risk factor and of the overall assessment.
///
/// Total order: low < medium < high < critical. The built-in rules only emit
/// low through high; `Critical` exists for rule extensions.
///
/// # Examples
///
/// ```
/// use patchgate_core::RiskLevel;
///
/// assert!(RiskLevel::High > RiskLevel::Medium);
/// let level: RiskLevel = "high".parse().unwrap();
/// assert_eq!(level, RiskLevel::High);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No factor triggered.
    #[default]
    Low,
    /// Worth a look before applying.
    Medium,
    /// Should be reviewed by a human.
    High,
    /// Reserved for rule extensions.
    Critical,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(format!("unknown risk level: {other}")),
        }
    }
}

/// Category of a heuristic risk signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFactorKind {
    /// Could break consumers of the changed files.
    BreakingChange,
    /// Touches secrets or security-sensitive configuration.
    Security,
    /// Could regress runtime behavior.
    Performance,
    /// The change is large or hard to review.
    Complexity,
    /// Touches dependency manifests.
    Dependency,
}

impl fmt::Display for RiskFactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskFactorKind::BreakingChange => write!(f, "breaking-change"),
            RiskFactorKind::Security => write!(f, "security"),
            RiskFactorKind::Performance => write!(f, "performance"),
            RiskFactorKind::Complexity => write!(f, "complexity"),
            RiskFactorKind::Dependency => write!(f, "dependency"),
        }
    }
}

/// One heuristic signal contributing to the overall risk classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    /// Category of the signal.
    pub kind: RiskFactorKind,
    /// Severity contributed by this factor.
    pub level: RiskLevel,
    /// Human-readable explanation.
    pub description: String,
    /// Optional mitigation advice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mitigation: Option<String>,
}

/// Overall risk classification for a batch of operations.
///
/// # Examples
///
/// ```
/// use patchgate_core::{RiskAssessment, RiskLevel};
///
/// let assessment = RiskAssessment::from_factors(vec![]);
/// assert_eq!(assessment.level, RiskLevel::Low);
/// assert!(!assessment.requires_review);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Maximum severity across all factors.
    pub level: RiskLevel,
    /// Triggered factors, in rule order.
    pub factors: Vec<RiskFactor>,
    /// Each factor's mitigation, in factor order.
    pub recommendations: Vec<String>,
    /// `true` exactly when `level != low`.
    pub requires_review: bool,
}

impl RiskAssessment {
    /// Derive level, recommendations, and the review flag from a factor list.
    pub fn from_factors(factors: Vec<RiskFactor>) -> Self {
        let level = factors
            .iter()
            .map(|f| f.level)
            .max()
            .unwrap_or(RiskLevel::Low);
        let recommendations = factors
            .iter()
            .filter_map(|f| f.mitigation.clone())
            .collect();
        Self {
            level,
            factors,
            recommendations,
            requires_review: level != RiskLevel::Low,
        }
    }
}

/// Per-preview rollup of file counts and line totals.
///
/// # Examples
///
/// ```
/// use patchgate_core::Summary;
///
/// let summary = Summary::default();
/// assert_eq!(summary.estimated_review_minutes, 0);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Files created.
    pub files_created: usize,
    /// Files updated or appended to.
    pub files_modified: usize,
    /// Files deleted.
    pub files_deleted: usize,
    /// Files moved.
    pub files_moved: usize,
    /// Total lines added across all files.
    pub total_additions: u32,
    /// Total lines deleted across all files.
    pub total_deletions: u32,
    /// Overall risk level for the batch.
    pub risk_level: RiskLevel,
    /// `ceil(total_changed_lines / 10 * 0.5)`.
    pub estimated_review_minutes: u32,
}

impl Summary {
    /// Review-time estimate for a number of changed lines.
    pub fn estimate_review_minutes(total_changed_lines: u32) -> u32 {
        (f64::from(total_changed_lines) / 10.0 * 0.5).ceil() as u32
    }
}

/// A complete reviewable change set for one batch of operations.
///
/// Pure derivation of the operation list and diffs; rebuilt fresh per call
/// with no hidden state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preview {
    /// Per-file diffs in input order.
    pub files: Vec<FileDiff>,
    /// Rollup counters.
    pub summary: Summary,
    /// Risk classification over the whole batch.
    pub risk: RiskAssessment,
    /// When the preview was generated.
    pub generated_at: DateTime<Utc>,
    /// Batch-level warnings.
    pub warnings: Vec<String>,
    /// Batch-level suggestions.
    pub suggestions: Vec<String>,
}

/// Rendering format for a preview.
///
/// Implements [`FromStr`] so it can be used directly with `clap`.
///
/// # Examples
///
/// ```
/// use patchgate_core::DiffFormat;
///
/// let fmt: DiffFormat = "side-by-side".parse().unwrap();
/// assert_eq!(fmt, DiffFormat::SideBySide);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffFormat {
    /// Patch-compatible unified diff text.
    #[default]
    Unified,
    /// Two-column original/modified view.
    SideBySide,
    /// Single-column view with both line numberings.
    Inline,
    /// Structured markup with escaped content.
    Html,
    /// Plain markdown with fenced diff blocks.
    Markdown,
    /// ANSI-colorized unified view.
    Terminal,
}

impl fmt::Display for DiffFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffFormat::Unified => write!(f, "unified"),
            DiffFormat::SideBySide => write!(f, "side-by-side"),
            DiffFormat::Inline => write!(f, "inline"),
            DiffFormat::Html => write!(f, "html"),
            DiffFormat::Markdown => write!(f, "markdown"),
            DiffFormat::Terminal => write!(f, "terminal"),
        }
    }
}

impl FromStr for DiffFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unified" => Ok(DiffFormat::Unified),
            "side-by-side" | "sidebyside" => Ok(DiffFormat::SideBySide),
            "inline" => Ok(DiffFormat::Inline),
            "html" => Ok(DiffFormat::Html),
            "markdown" | "md" => Ok(DiffFormat::Markdown),
            "terminal" | "term" => Ok(DiffFormat::Terminal),
            other => Err(format!("unknown diff format: {other}")),
        }
    }
}

/// Context lines above this are rejected as a configuration error.
pub const MAX_CONTEXT_LINES: u32 = 1000;

/// Options controlling hunk construction and rendering.
///
/// # Examples
///
/// ```
/// use patchgate_core::DiffOptions;
///
/// let options = DiffOptions::default();
/// assert_eq!(options.context_lines, 3);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    /// Unchanged lines kept around each change (default: 3).
    pub context_lines: u32,
    /// Compare lines with surrounding whitespace stripped.
    pub ignore_whitespace: bool,
    /// Rendering format for CLI output.
    pub format: DiffFormat,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            context_lines: 3,
            ignore_whitespace: false,
            format: DiffFormat::Unified,
        }
    }
}

impl DiffOptions {
    /// Reject out-of-range settings before they reach the hunk builder.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PatchgateError::Config`] when `context_lines` exceeds
    /// [`MAX_CONTEXT_LINES`].
    pub fn validate(&self) -> crate::Result<()> {
        if self.context_lines > MAX_CONTEXT_LINES {
            return Err(crate::PatchgateError::Config(format!(
                "context_lines {} exceeds maximum {MAX_CONTEXT_LINES}",
                self.context_lines
            )));
        }
        Ok(())
    }
}
