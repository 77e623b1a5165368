// Utilities Module
//
// File helpers, content hashing and output path conventions shared by the
// pipeline, the CLI and the Python bindings.

/// Output and temporary path conventions
pub mod paths;

/// File utilities
pub mod file_utils {
    use crate::error::{ExtractError, Result};
    use crate::language::detect_language_from_extension;
    use anyhow::Context;
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Check if a file has a Python extension
    pub fn is_python_file(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(detect_language_from_extension)
            .is_some()
    }

    /// Read file content, reporting the path on failure
    pub fn read_file_content(path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))
    }

    /// Expand file arguments that may contain glob patterns
    ///
    /// Plain paths pass through unchanged. Patterns matching nothing are an error so
    /// a typo is not mistaken for an empty module set. Non-Python matches are skipped.
    pub fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for pattern in patterns {
            if !pattern.contains(|c: char| matches!(c, '*' | '?' | '[')) {
                files.push(PathBuf::from(pattern));
                continue;
            }

            let mut matched = 0usize;
            for entry in glob::glob(pattern).with_context(|| format!("Invalid pattern '{}'", pattern))? {
                let path = entry.with_context(|| format!("Unreadable match for '{}'", pattern))?;
                if path.is_file() && is_python_file(&path) {
                    files.push(path);
                    matched += 1;
                }
            }

            if matched == 0 {
                anyhow::bail!("Pattern '{}' matched no Python files", pattern);
            }
        }

        files.dedup();
        Ok(files)
    }
}

/// Compute the blake3 hex digest of a content string
pub fn hash_content(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}
