use std::collections::HashMap;
use std::path::{Path, PathBuf};

use patchgate_core::{PatchgateError, Result};

/// Collaborator interface for fetching original file contents.
///
/// `Ok(None)` means the file does not exist; the assembler turns that into an
/// empty original text (an all-additions diff), never an error. Errors are
/// reserved for reads that fail in other ways (permissions, non-UTF-8 data).
pub trait ContentSource {
    /// Read the current content of `path`, or `None` if it does not exist.
    fn read(&self, path: &Path) -> Result<Option<String>>;
}

/// Content source backed by a workspace directory on disk.
///
/// # Examples
///
/// ```no_run
/// use patchgate_preview::{ContentSource, FsContentSource};
/// use std::path::Path;
///
/// let source = FsContentSource::new(".");
/// let content = source.read(Path::new("Cargo.toml")).unwrap();
/// assert!(content.is_some());
/// ```
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    /// Create a source rooted at `root`; operation paths resolve against it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ContentSource for FsContentSource {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        let full = self.root.join(path);
        match std::fs::read(&full) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|_| PatchgateError::Decode(full)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// In-memory content source for hosts that already hold file contents
/// (and for tests).
///
/// # Examples
///
/// ```
/// use patchgate_preview::{ContentSource, MemoryContentSource};
/// use std::path::Path;
///
/// let source = MemoryContentSource::default()
///     .with_file("src/lib.rs", "pub fn f() {}\n");
/// assert!(source.read(Path::new("src/lib.rs")).unwrap().is_some());
/// assert!(source.read(Path::new("missing.rs")).unwrap().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryContentSource {
    files: HashMap<PathBuf, String>,
}

impl MemoryContentSource {
    /// Add a file, builder style.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl ContentSource for MemoryContentSource {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.files.get(path).cloned())
    }
}
