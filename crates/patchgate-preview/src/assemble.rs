use chrono::Utc;
use patchgate_core::{
    DiffOptions, FileDiff, Operation, OperationKind, PatchgateConfig, Preview, Result,
    RiskAssessment, RiskConfig, Summary,
};
use patchgate_diff::{build_hunks, compute_stats, detect_language};

use crate::advice;
use crate::observer::{NullObserver, PreviewObserver};
use crate::risk::RiskAssessor;
use crate::source::ContentSource;

/// Orchestrates the preview pipeline: per-file diffs, aggregate summary,
/// risk assessment, and batch advice.
///
/// A file whose diff cannot be built (unreadable or undecodable source) is
/// logged, reported to the observer, and excluded from the preview; the batch
/// continues. Output preserves operation input order.
///
/// # Examples
///
/// ```
/// use patchgate_core::{DiffOptions, Operation, OperationKind, RiskLevel};
/// use patchgate_preview::{MemoryContentSource, PreviewAssembler};
/// use std::path::PathBuf;
///
/// let source = MemoryContentSource::default();
/// let assembler = PreviewAssembler::new(source, DiffOptions::default()).unwrap();
/// let ops = vec![Operation {
///     id: "1".into(),
///     kind: OperationKind::Create,
///     path: PathBuf::from("new.txt"),
///     content: Some("hello\n".into()),
///     description: None,
/// }];
/// let preview = assembler.assemble(&ops);
/// assert_eq!(preview.files.len(), 1);
/// assert_eq!(preview.risk.level, RiskLevel::Low);
/// ```
pub struct PreviewAssembler<S> {
    source: S,
    options: DiffOptions,
    risk_config: RiskConfig,
    assessor: RiskAssessor,
    observer: Box<dyn PreviewObserver>,
}

impl<S: ContentSource> PreviewAssembler<S> {
    /// Create an assembler with default risk configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid `options`; nothing enters
    /// the hunk builder unvalidated.
    pub fn new(source: S, options: DiffOptions) -> Result<Self> {
        Self::with_config(source, options, &PatchgateConfig::default())
    }

    /// Create an assembler honoring the `[risk]` section of `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for invalid `options`.
    pub fn with_config(source: S, options: DiffOptions, config: &PatchgateConfig) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            source,
            options,
            risk_config: config.risk.clone(),
            assessor: RiskAssessor::from_config(&config.risk),
            observer: Box::new(NullObserver),
        })
    }

    /// Replace the notice sink, builder style.
    pub fn with_observer(mut self, observer: Box<dyn PreviewObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Build a complete preview for a batch of operations.
    pub fn assemble(&self, operations: &[Operation]) -> Preview {
        let mut files = Vec::with_capacity(operations.len());
        for operation in operations {
            match self.build_file_diff(operation) {
                Ok(diff) => files.push(diff),
                Err(err) => {
                    tracing::warn!(
                        path = %operation.path.display(),
                        error = %err,
                        "skipping file from preview"
                    );
                    self.observer.on_warn(&format!(
                        "skipping {}: {err}",
                        operation.path.display()
                    ));
                }
            }
        }

        let risk = self.assessor.assess(operations);
        let summary = summarize(operations, &files, &risk);
        let warnings = advice::warnings(operations, &self.risk_config);
        let suggestions = advice::suggestions(operations, &self.risk_config);

        Preview {
            files,
            summary,
            risk,
            generated_at: Utc::now(),
            warnings,
            suggestions,
        }
    }

    /// Diff a single operation against its original content.
    ///
    /// A missing original is not an error: update/append/delete on a
    /// nonexistent file diff against empty text.
    fn build_file_diff(&self, operation: &Operation) -> Result<FileDiff> {
        let original = match operation.kind {
            OperationKind::Update | OperationKind::Delete | OperationKind::Append => self
                .source
                .read(&operation.path)?
                .unwrap_or_default(),
            OperationKind::Create | OperationKind::Move => String::new(),
        };

        let modified = match operation.kind {
            OperationKind::Delete => String::new(),
            OperationKind::Append => match operation.content.as_deref() {
                Some(content) if original.is_empty() => content.to_string(),
                Some(content) => {
                    let base = original.strip_suffix('\n').unwrap_or(&original);
                    format!("{base}\n{content}")
                }
                None => original.clone(),
            },
            _ => operation.content.clone().unwrap_or_default(),
        };

        let hunks = build_hunks(&original, &modified, &self.options);
        let stats = compute_stats(&hunks);
        let language = detect_language(&operation.path).map(str::to_string);

        Ok(FileDiff {
            path: operation.path.clone(),
            operation: operation.clone(),
            hunks,
            language,
            original,
            modified,
            stats,
        })
    }
}

fn summarize(operations: &[Operation], files: &[FileDiff], risk: &RiskAssessment) -> Summary {
    let mut summary = Summary {
        risk_level: risk.level,
        ..Summary::default()
    };

    for operation in operations {
        match operation.kind {
            OperationKind::Create => summary.files_created += 1,
            OperationKind::Update | OperationKind::Append => summary.files_modified += 1,
            OperationKind::Delete => summary.files_deleted += 1,
            OperationKind::Move => summary.files_moved += 1,
        }
    }

    for file in files {
        summary.total_additions += file.stats.additions;
        summary.total_deletions += file.stats.deletions;
    }

    summary.estimated_review_minutes =
        Summary::estimate_review_minutes(summary.total_additions + summary.total_deletions);
    summary
}
