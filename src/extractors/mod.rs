//! Extractors Module
//!
//! tree-sitter based extraction of the top-level namespace of a Python module.
//!
//! # Architecture
//!
//! - `base` - SourceModule, symbol table types and the shared BaseExtractor
//! - `manager` - ExtractorManager public API (parse, build table, scan markers)
//! - `python` - Python statement handling (functions, classes, assignments, imports)

pub mod base;
pub mod manager;
pub mod python;

// Re-export the public API
pub use base::{
    Decorator, SourceModule, StatementId, SymbolKind, SymbolTable, TopLevelSymbol,
};
pub use manager::ExtractorManager;
