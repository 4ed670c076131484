use std::path::Path;

/// Detect a language tag from a file extension. Pure lookup; renderers use it
/// for syntax-highlighting hints and fence info strings.
///
/// # Examples
///
/// ```
/// use patchgate_diff::detect_language;
/// use std::path::Path;
///
/// assert_eq!(detect_language(Path::new("src/main.rs")), Some("rust"));
/// assert_eq!(detect_language(Path::new("app.tsx")), Some("typescript"));
/// assert_eq!(detect_language(Path::new("notes")), None);
/// ```
pub fn detect_language(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    let language = match ext {
        "rs" => "rust",
        "ts" | "tsx" => "typescript",
        "js" | "jsx" | "mjs" => "javascript",
        "py" => "python",
        "go" => "go",
        "java" => "java",
        "c" | "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "rb" => "ruby",
        "php" => "php",
        "kt" | "kts" => "kotlin",
        "swift" => "swift",
        "cs" => "csharp",
        "sh" | "bash" => "shell",
        "sql" => "sql",
        "html" | "htm" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        "txt" => "text",
        _ => return None,
    };
    Some(language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_source_extensions() {
        assert_eq!(detect_language(Path::new("lib.rs")), Some("rust"));
        assert_eq!(detect_language(Path::new("app.py")), Some("python"));
        assert_eq!(detect_language(Path::new("index.jsx")), Some("javascript"));
        assert_eq!(detect_language(Path::new("main.go")), Some("go"));
    }

    #[test]
    fn config_and_doc_extensions() {
        assert_eq!(detect_language(Path::new("Cargo.toml")), Some("toml"));
        assert_eq!(detect_language(Path::new("ci.yml")), Some("yaml"));
        assert_eq!(detect_language(Path::new("README.md")), Some("markdown"));
    }

    #[test]
    fn unknown_or_missing_extension_is_none() {
        assert_eq!(detect_language(Path::new("data.csv")), None);
        assert_eq!(detect_language(Path::new("Makefile")), None);
        assert_eq!(detect_language(Path::new(".gitignore")), None);
    }
}
