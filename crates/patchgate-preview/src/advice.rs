//! Batch-level warnings and suggestions.
//!
//! Same discipline as the risk rules: each scan is an independent predicate
//! over the operation list producing at most one message, so new advice can
//! be added without touching existing scans.

use patchgate_core::{Operation, OperationKind, RiskConfig};

/// Collect warnings for a batch of operations.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Operation, OperationKind, RiskConfig};
/// use patchgate_preview::warnings;
/// use std::path::PathBuf;
///
/// let ops = vec![Operation {
///     id: "1".into(),
///     kind: OperationKind::Delete,
///     path: PathBuf::from("old.rs"),
///     content: None,
///     description: None,
/// }];
/// let warnings = warnings(&ops, &RiskConfig::default());
/// assert_eq!(warnings, vec!["1 file(s) will be deleted".to_string()]);
/// ```
pub fn warnings(operations: &[Operation], config: &RiskConfig) -> Vec<String> {
    let scans = [deletions_warning(operations), large_operations_warning(operations, config)];
    scans.into_iter().flatten().collect()
}

/// Collect suggestions for a batch of operations.
pub fn suggestions(operations: &[Operation], config: &RiskConfig) -> Vec<String> {
    let scans = [
        missing_tests_suggestion(operations),
        batch_size_suggestion(operations, config),
    ];
    scans.into_iter().flatten().collect()
}

fn deletions_warning(operations: &[Operation]) -> Option<String> {
    let count = operations
        .iter()
        .filter(|op| op.kind == OperationKind::Delete)
        .count();
    (count > 0).then(|| format!("{count} file(s) will be deleted"))
}

fn large_operations_warning(operations: &[Operation], config: &RiskConfig) -> Option<String> {
    let count = operations
        .iter()
        .filter(|op| op.content_lines() > config.large_change_lines)
        .count();
    (count > 0).then(|| format!("{count} large file operation(s)"))
}

fn missing_tests_suggestion(operations: &[Operation]) -> Option<String> {
    let touches_source = operations.iter().any(|op| {
        patchgate_diff::detect_language(&op.path)
            .is_some_and(|lang| !matches!(lang, "markdown" | "text" | "json" | "yaml" | "toml"))
    });
    let touches_tests = operations.iter().any(|op| {
        let path = op.path.to_string_lossy().to_lowercase();
        path.contains("test") || path.contains("spec")
    });
    (touches_source && !touches_tests)
        .then(|| "No test files in this batch; consider adding or updating tests".to_string())
}

fn batch_size_suggestion(operations: &[Operation], config: &RiskConfig) -> Option<String> {
    (operations.len() > config.batch_size_hint).then(|| {
        format!(
            "Batch contains {} operations; consider applying in smaller batches",
            operations.len()
        )
    })
}
