//! ExtractorManager - Public API for parsing and symbol table construction
//!
//! Handles module parsing and delegates to the Python extractor. This module provides
//! the entry points the pipeline uses for the first two stages (parse, build table)
//! and for the read-only marker scan.

use crate::error::Result;
use crate::extractors::base::{SourceModule, SymbolTable};
use crate::extractors::python::PythonExtractor;

/// Manager for the Python extractor
pub struct ExtractorManager {
    // No state needed - this is a stateless manager
}

impl Default for ExtractorManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorManager {
    pub fn new() -> Self {
        Self {}
    }

    /// Parse module text into a `SourceModule`
    pub fn parse_module(&self, content: &str) -> Result<SourceModule> {
        let module = SourceModule::parse(content)?;
        tracing::debug!(
            "Parsed module: {} bytes, {} top-level statements",
            content.len(),
            module.statements().len()
        );
        Ok(module)
    }

    /// Build the top-level symbol table of a parsed module
    pub fn build_symbol_table(&self, module: &SourceModule) -> SymbolTable {
        PythonExtractor::new(module).extract_symbols()
    }

    /// List every top-level function decorated with `marker`, in source order
    pub fn scan_marked_symbols(&self, content: &str, marker: &str) -> Result<Vec<String>> {
        let module = self.parse_module(content)?;
        let names = PythonExtractor::marked_functions(&module, marker);
        tracing::debug!("Found {} functions marked with @{}", names.len(), marker);
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractError;

    #[test]
    fn test_scan_reports_parse_errors() {
        let manager = ExtractorManager::new();
        let err = manager.scan_marked_symbols("def (:\n", "Marker").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_scan_without_markers_is_empty() {
        let manager = ExtractorManager::new();
        let names = manager
            .scan_marked_symbols("def a():\n    pass\n", "Marker")
            .unwrap();
        assert!(names.is_empty());
    }
}
