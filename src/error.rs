// Error types for the extraction pipeline
//
// Every stage returns `Result<T, ExtractError>`. Unresolved references are not
// errors: they are collected on the closure and the emitted unit instead.

use crate::extractors::base::SymbolKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by parsing, resolution, emission and writing
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Module text is not syntactically valid Python
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// The requested entry symbol is not bound at module top level
    #[error("symbol '{name}' is not defined at module top level")]
    SymbolNotFound { name: String },

    /// The entry symbol exists but is not a function definition
    #[error("symbol '{name}' is a {kind}, not a function")]
    NotAFunction { name: String, kind: SymbolKind },

    /// Output directory or file could not be created/written
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Re-parsing the freshly emitted unit failed
    #[error("emitted unit for '{entry}' is not valid Python: {reason}")]
    EmissionInvalid { entry: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
