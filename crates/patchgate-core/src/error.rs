use std::path::PathBuf;

/// Errors that can occur across the patchgate crates.
///
/// Each variant wraps a specific error domain. Library crates use this type
/// directly; the binary crate converts to `miette` diagnostics at the boundary.
///
/// # Examples
///
/// ```
/// use patchgate_core::PatchgateError;
///
/// let err = PatchgateError::Config("context_lines too large".into());
/// assert!(err.to_string().contains("context_lines too large"));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PatchgateError {
    /// Filesystem I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid or missing configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A file's content could not be decoded as UTF-8 text.
    #[error("decode error: {} is not valid UTF-8", .0.display())]
    Decode(PathBuf),

    /// JSON serialization / deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
