// Base Extractor Types and Traits
//
// Modular structure:
// - types.rs: Data structures (TopLevelSymbol, SymbolKind, Decorator, SymbolTable)
// - source.rs: SourceModule, the parsed read-only module
// - extractor.rs: BaseExtractor implementation (core state)
// - creation_methods.rs: Symbol creation and registration
// - tree_methods.rs: Tree navigation and traversal methods

pub mod creation_methods;
pub mod extractor;
pub mod source;
pub mod tree_methods;
pub mod types;

// Re-export key types for external use
pub use extractor::BaseExtractor;
pub use source::SourceModule;
pub use types::{
    Decorator, StatementId, SymbolKind, SymbolOptions, SymbolTable, TopLevelSymbol,
};
