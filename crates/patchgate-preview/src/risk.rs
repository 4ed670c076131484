//! Heuristic risk classification over a batch of proposed operations.
//!
//! Rules are independent predicates over the operation list; each contributes
//! at most one factor and never mutates another rule's output. The overall
//! level is the maximum severity among triggered factors.

use std::path::Path;

use patchgate_core::{
    Operation, OperationKind, RiskAssessment, RiskConfig, RiskFactor, RiskFactorKind, RiskLevel,
};

/// File names that gate automatic application when touched: dependency
/// manifests and type/build configuration. Compared case-insensitively
/// against the last path component.
const CRITICAL_FILES: &[&str] = &[
    "package.json",
    "cargo.toml",
    "go.mod",
    "requirements.txt",
    "pyproject.toml",
    "gemfile",
    "composer.json",
    "pom.xml",
    "build.gradle",
    "tsconfig.json",
    "jsconfig.json",
    "webpack.config.js",
    "vite.config.ts",
    "babel.config.js",
    "makefile",
    "dockerfile",
    "docker-compose.yml",
    "cmakelists.txt",
];

/// Evaluates the built-in risk rules plus configured critical-path patterns.
///
/// # Examples
///
/// ```
/// use patchgate_core::{Operation, OperationKind, RiskLevel};
/// use patchgate_preview::RiskAssessor;
/// use std::path::PathBuf;
///
/// let assessor = RiskAssessor::default_assessor();
/// let ops = vec![Operation {
///     id: "1".into(),
///     kind: OperationKind::Create,
///     path: PathBuf::from("new.txt"),
///     content: Some("hello\n".into()),
///     description: None,
/// }];
/// let assessment = assessor.assess(&ops);
/// assert_eq!(assessment.level, RiskLevel::Low);
/// assert!(!assessment.requires_review);
/// ```
pub struct RiskAssessor {
    critical_patterns: Vec<glob::Pattern>,
    large_change_lines: usize,
}

impl RiskAssessor {
    /// Create an assessor with the built-in rules only.
    pub fn default_assessor() -> Self {
        Self {
            critical_patterns: Vec::new(),
            large_change_lines: 100,
        }
    }

    /// Create an assessor from risk configuration. Invalid glob patterns are
    /// ignored rather than failing the whole assessment.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchgate_core::RiskConfig;
    /// use patchgate_preview::RiskAssessor;
    ///
    /// let config = RiskConfig {
    ///     critical_paths: vec!["migrations/**".into()],
    ///     ..RiskConfig::default()
    /// };
    /// let assessor = RiskAssessor::from_config(&config);
    /// assert!(assessor.is_critical(std::path::Path::new("migrations/001.sql")));
    /// ```
    pub fn from_config(config: &RiskConfig) -> Self {
        let mut critical_patterns = Vec::new();
        for pat in &config.critical_paths {
            if let Ok(p) = glob::Pattern::new(pat) {
                critical_patterns.push(p);
            }
        }

        Self {
            critical_patterns,
            large_change_lines: config.large_change_lines,
        }
    }

    /// Classify a batch of operations.
    ///
    /// All matching rules contribute a factor; the assessment's level is the
    /// maximum severity observed, defaulting to low when nothing triggers.
    pub fn assess(&self, operations: &[Operation]) -> RiskAssessment {
        let mut factors = Vec::new();

        if let Some(factor) = self.critical_files_rule(operations) {
            factors.push(factor);
        }
        if let Some(factor) = deletion_rule(operations) {
            factors.push(factor);
        }
        if let Some(factor) = self.large_content_rule(operations) {
            factors.push(factor);
        }

        RiskAssessment::from_factors(factors)
    }

    /// Whether `path` matches a built-in critical-file marker or a configured
    /// pattern.
    pub fn is_critical(&self, path: &Path) -> bool {
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if CRITICAL_FILES.contains(&file_name.as_str()) {
            return true;
        }
        // Secret and environment files.
        if file_name.starts_with(".env")
            || file_name.contains("secret")
            || file_name.contains("credential")
        {
            return true;
        }
        if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("pem") | Some("key")
        ) {
            return true;
        }

        let path_str = path.to_string_lossy();
        self.critical_patterns.iter().any(|p| p.matches(&path_str))
    }

    fn critical_files_rule(&self, operations: &[Operation]) -> Option<RiskFactor> {
        let touched: Vec<String> = operations
            .iter()
            .filter(|op| self.is_critical(&op.path))
            .map(|op| op.path.display().to_string())
            .collect();
        if touched.is_empty() {
            return None;
        }
        Some(RiskFactor {
            kind: RiskFactorKind::BreakingChange,
            level: RiskLevel::High,
            description: format!(
                "{} critical file(s) affected: {}",
                touched.len(),
                touched.join(", ")
            ),
            mitigation: Some("Review changes to critical files line by line before applying".into()),
        })
    }

    fn large_content_rule(&self, operations: &[Operation]) -> Option<RiskFactor> {
        let count = operations
            .iter()
            .filter(|op| op.content_lines() > self.large_change_lines)
            .count();
        if count == 0 {
            return None;
        }
        Some(RiskFactor {
            kind: RiskFactorKind::Complexity,
            level: RiskLevel::Medium,
            description: format!(
                "{count} operation(s) exceed {} lines of new content",
                self.large_change_lines
            ),
            mitigation: Some("Split large changes into smaller, focused operations".into()),
        })
    }
}

fn deletion_rule(operations: &[Operation]) -> Option<RiskFactor> {
    let count = operations
        .iter()
        .filter(|op| op.kind == OperationKind::Delete)
        .count();
    if count == 0 {
        return None;
    }
    Some(RiskFactor {
        kind: RiskFactorKind::BreakingChange,
        level: RiskLevel::Medium,
        description: format!("{count} file(s) will be deleted"),
        mitigation: Some("Confirm the deleted files have no remaining references".into()),
    })
}
