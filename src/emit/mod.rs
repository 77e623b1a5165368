//! Emission Module
//!
//! Turns a dependency closure back into standalone module text.
//!
//! # Architecture
//!
//! - `emitter` - CodeEmitter: imports, dependency definitions, then the entry function
//! - `pruner` - DeadImportPruner: drops import aliases the emitted body never reads

pub mod emitter;
pub mod pruner;

pub use emitter::CodeEmitter;
pub use pruner::{DeadImportPruner, PrunedSource};

use serde::Serialize;
use std::path::PathBuf;

/// A synthesized, standalone source unit for one entry function
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmittedUnit {
    /// Entry function name
    pub entry: String,
    /// Emitted module text, ending with a single newline
    pub source: String,
    /// Dependency definitions emitted before the entry, in source order
    pub definitions: Vec<String>,
    /// Import aliases dropped by the pruner
    pub removed_imports: Vec<String>,
    /// Referenced names bound neither at top level nor as Python builtins
    pub unresolved: Vec<String>,
    /// Where the unit was written; `None` until written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<PathBuf>,
}

impl EmittedUnit {
    /// blake3 hex digest of the emitted text
    pub fn content_hash(&self) -> String {
        crate::utils::hash_content(&self.source)
    }
}
