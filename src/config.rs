// Extraction configuration
//
// Every field has a default, so a config file only needs the keys it changes:
//
// ```json
// { "marker_name": "ServerlessEntry", "output_extension": "py" }
// ```

use crate::error::{ExtractError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default extraction marker decorator
pub const DEFAULT_MARKER: &str = "ExtractFunctionToFile";

/// Default extension of emitted units
pub const DEFAULT_EXTENSION: &str = "py";

// Marker: a Python identifier, optionally dotted (`pkg.Marker`)
static MARKER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
});

static EXTENSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Decorator that marks an entry function
    pub marker_name: String,
    /// Extension of emitted files, without the dot
    pub output_extension: String,
    /// Leave an existing output file alone when its content is identical
    pub skip_unchanged: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            marker_name: DEFAULT_MARKER.to_string(),
            output_extension: DEFAULT_EXTENSION.to_string(),
            skip_unchanged: true,
        }
    }
}

impl ExtractConfig {
    /// Default config with another marker
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker_name: marker.into(),
            ..Self::default()
        }
    }

    /// Load and validate a JSON config file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ExtractError::io(path, e))?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| ExtractError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !MARKER_PATTERN.is_match(&self.marker_name) {
            return Err(ExtractError::InvalidConfig(format!(
                "marker_name '{}' is not a Python identifier",
                self.marker_name
            )));
        }
        if !EXTENSION_PATTERN.is_match(&self.output_extension) {
            return Err(ExtractError::InvalidConfig(format!(
                "output_extension '{}' must be alphanumeric",
                self.output_extension
            )));
        }
        Ok(())
    }
}
