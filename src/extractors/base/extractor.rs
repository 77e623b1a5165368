// BaseExtractor implementation
//
// Shared state for a single symbol-table build: the module being read and the
// table being filled. Language extractors wrap it and delegate through `base()`.

use super::source::SourceModule;
use super::types::SymbolTable;

/// Base implementation for language extractors
pub struct BaseExtractor<'m> {
    pub language: String,
    pub module: &'m SourceModule,
    pub table: SymbolTable,
}

impl<'m> BaseExtractor<'m> {
    pub fn new(language: String, module: &'m SourceModule) -> Self {
        Self {
            language,
            module,
            table: SymbolTable::new(),
        }
    }

    /// Consume the extractor, yielding the finished table
    pub fn into_table(self) -> SymbolTable {
        self.table
    }
}
