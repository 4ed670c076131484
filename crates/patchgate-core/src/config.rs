use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PatchgateError;
use crate::types::{DiffFormat, DiffOptions};

/// Top-level configuration loaded from `.patchgate.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use patchgate_core::PatchgateConfig;
///
/// let config = PatchgateConfig::default();
/// assert_eq!(config.diff.context_lines, 3);
/// assert_eq!(config.risk.large_change_lines, 100);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchgateConfig {
    /// Hunk construction and rendering settings.
    #[serde(default)]
    pub diff: DiffConfig,
    /// Risk rule settings.
    #[serde(default)]
    pub risk: RiskConfig,
}

impl PatchgateConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PatchgateError::Io`] if the file cannot be read, or
    /// [`PatchgateError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use patchgate_core::PatchgateConfig;
    /// use std::path::Path;
    ///
    /// let config = PatchgateConfig::from_file(Path::new(".patchgate.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, PatchgateError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`PatchgateError::Toml`] if parsing fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use patchgate_core::PatchgateConfig;
    ///
    /// let toml = r#"
    /// [diff]
    /// context_lines = 5
    /// "#;
    /// let config = PatchgateConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.diff.context_lines, 5);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, PatchgateError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Build validated [`DiffOptions`] from the `[diff]` section.
    ///
    /// # Errors
    ///
    /// Returns [`PatchgateError::Config`] for out-of-range settings.
    pub fn options(&self) -> Result<DiffOptions, PatchgateError> {
        let options = DiffOptions {
            context_lines: self.diff.context_lines,
            ignore_whitespace: self.diff.ignore_whitespace,
            format: self.diff.format,
        };
        options.validate()?;
        Ok(options)
    }
}

/// `[diff]` section of the configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffConfig {
    /// Unchanged lines kept around each change (default: 3).
    #[serde(default = "default_context_lines")]
    pub context_lines: u32,
    /// Compare lines with surrounding whitespace stripped.
    #[serde(default)]
    pub ignore_whitespace: bool,
    /// Default rendering format.
    #[serde(default)]
    pub format: DiffFormat,
}

fn default_context_lines() -> u32 {
    3
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: default_context_lines(),
            ignore_whitespace: false,
            format: DiffFormat::default(),
        }
    }
}

/// `[risk]` section of the configuration.
///
/// # Examples
///
/// ```
/// use patchgate_core::RiskConfig;
///
/// let config = RiskConfig::default();
/// assert!(config.critical_paths.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Additional critical-path glob patterns (e.g. `"migrations/**"`).
    /// The built-in markers for manifests, build config, and secret files
    /// always apply.
    #[serde(default)]
    pub critical_paths: Vec<String>,
    /// Content line count above which an operation is flagged as complex
    /// (default: 100).
    #[serde(default = "default_large_change_lines")]
    pub large_change_lines: usize,
    /// Batch size above which splitting is suggested (default: 10).
    #[serde(default = "default_batch_size_hint")]
    pub batch_size_hint: usize,
}

fn default_large_change_lines() -> usize {
    100
}

fn default_batch_size_hint() -> usize {
    10
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            critical_paths: Vec::new(),
            large_change_lines: default_large_change_lines(),
            batch_size_hint: default_batch_size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MAX_CONTEXT_LINES;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = PatchgateConfig::from_toml("").unwrap();
        assert_eq!(config.diff.context_lines, 3);
        assert!(!config.diff.ignore_whitespace);
        assert_eq!(config.diff.format, DiffFormat::Unified);
        assert_eq!(config.risk.large_change_lines, 100);
        assert_eq!(config.risk.batch_size_hint, 10);
    }

    #[test]
    fn sections_parse_independently() {
        let toml = r#"
[diff]
context_lines = 1
ignore_whitespace = true
format = "markdown"

[risk]
critical_paths = ["migrations/**", "infra/*.tf"]
large_change_lines = 50
"#;
        let config = PatchgateConfig::from_toml(toml).unwrap();
        assert_eq!(config.diff.context_lines, 1);
        assert!(config.diff.ignore_whitespace);
        assert_eq!(config.diff.format, DiffFormat::Markdown);
        assert_eq!(config.risk.critical_paths.len(), 2);
        assert_eq!(config.risk.large_change_lines, 50);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(PatchgateConfig::from_toml("[diff").is_err());
    }

    #[test]
    fn options_validates_context_lines() {
        let mut config = PatchgateConfig::default();
        config.diff.context_lines = MAX_CONTEXT_LINES + 1;
        assert!(matches!(
            config.options(),
            Err(PatchgateError::Config(_))
        ));

        config.diff.context_lines = 0;
        let options = config.options().unwrap();
        assert_eq!(options.context_lines, 0);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let config = PatchgateConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed = PatchgateConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.diff.context_lines, config.diff.context_lines);
        assert_eq!(parsed.risk.batch_size_hint, config.risk.batch_size_hint);
    }
}
