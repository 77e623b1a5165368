/// Python extractor: builds the top-level symbol table of a module
///
/// This module is organized into focused sub-modules:
/// - helpers: Shared utility functions
/// - types: Class extraction
/// - functions: Function extraction
/// - decorators: Decorator extraction and marker matching
/// - imports: Import statement bindings and rendering
/// - assignments: Variable and constant assignment extraction
/// - identifiers: Free-name collection for dependency tracking
pub(crate) mod assignments;
pub(crate) mod decorators;
pub(crate) mod functions;
pub(crate) mod helpers;
pub(crate) mod identifiers;
pub(crate) mod imports;
pub(crate) mod types;

pub use identifiers::collect_references;
pub use imports::{import_bindings, is_wildcard_import, render_import, ImportBinding};

use crate::extractors::base::{BaseExtractor, SourceModule, StatementId, SymbolTable};
use crate::language::PYTHON;
use tracing::debug;
use tree_sitter::Node;

/// Python extractor for building a symbol table from one parsed module
pub struct PythonExtractor<'m> {
    base: BaseExtractor<'m>,
}

impl<'m> PythonExtractor<'m> {
    pub fn new(module: &'m SourceModule) -> Self {
        Self {
            base: BaseExtractor::new(PYTHON.to_string(), module),
        }
    }

    /// Walk top-level statements and record every name they bind
    pub fn extract_symbols(mut self) -> SymbolTable {
        let module = self.base.module;
        for (index, node) in module.statements().into_iter().enumerate() {
            self.extract_statement(node, StatementId(index));
        }

        debug!(
            "Extracted {} top-level {} symbols from {} statements",
            self.base.table.len(),
            self.base.language,
            module.statements().len()
        );
        self.base.into_table()
    }

    fn extract_statement(&mut self, node: Node<'m>, statement: StatementId) {
        match node.kind() {
            "function_definition" => {
                functions::extract_function(self, node, statement, Vec::new());
            }
            "class_definition" => {
                types::extract_class(self, node, statement, Vec::new());
            }
            "decorated_definition" => {
                let decorators = decorators::extract_decorators(self.base.module, &node);
                match helpers::definition_of(&node) {
                    Some(definition) if definition.kind() == "function_definition" => {
                        functions::extract_function(self, definition, statement, decorators);
                    }
                    Some(definition) if definition.kind() == "class_definition" => {
                        types::extract_class(self, definition, statement, decorators);
                    }
                    _ => {}
                }
            }
            "expression_statement" => {
                assignments::extract_assignment(self, node, statement);
            }
            "import_statement" | "import_from_statement" => {
                imports::extract_imports(self, node, statement);
            }
            "future_import_statement" => {
                self.base.table.record_future_import(statement);
            }
            other => {
                debug!("Statement {} ({}) binds no names", statement.0, other);
            }
        }
    }

    /// Top-level functions whose decorators include `marker`, in source order
    pub fn marked_functions(module: &SourceModule, marker: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();

        for node in module.statements() {
            if node.kind() != "decorated_definition" {
                continue;
            }
            let definition = match helpers::definition_of(&node) {
                Some(definition) if definition.kind() == "function_definition" => definition,
                _ => continue,
            };

            let decorators = decorators::extract_decorators(module, &node);
            if decorators.iter().any(|d| d.matches_marker(marker)) {
                if let Some(name) = module.get_field_text(&definition, "name") {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }

        names
    }

    // ========================================================================
    // Accessors for sub-modules
    // ========================================================================

    pub(crate) fn base(&self) -> &BaseExtractor<'m> {
        &self.base
    }

    pub(crate) fn base_mut(&mut self) -> &mut BaseExtractor<'m> {
        &mut self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::SymbolKind;

    const SERVICE: &str = include_str!("../../../test_samples/service.py");

    #[test]
    fn test_service_symbol_table() {
        let module = SourceModule::parse(SERVICE).unwrap();
        let table = PythonExtractor::new(&module).extract_symbols();

        assert_eq!(table.get("app").map(|s| s.kind), Some(SymbolKind::Variable));
        assert_eq!(table.get("Item").map(|s| s.kind), Some(SymbolKind::Class));
        assert_eq!(table.get("read_item").map(|s| s.kind), Some(SymbolKind::Function));
        assert_eq!(table.get("requests").map(|s| s.kind), Some(SymbolKind::ImportAlias));
        assert_eq!(table.get("Optional").map(|s| s.kind), Some(SymbolKind::ImportAlias));

        // aliases of one statement share its identity
        assert_eq!(
            table.get("FastAPI").map(|s| s.statement),
            table.get("HTTPException").map(|s| s.statement)
        );
    }

    #[test]
    fn test_future_and_wildcard_imports_are_recorded() {
        let module = SourceModule::parse(
            "from __future__ import annotations\nfrom helpers import *\nimport os\n",
        )
        .unwrap();
        let table = PythonExtractor::new(&module).extract_symbols();
        assert!(table.future_imports().contains(&StatementId(0)));
        assert!(table.wildcard_imports().contains(&StatementId(1)));
        assert!(!table.contains("annotations"));
        assert!(table.contains("os"));
    }

    #[test]
    fn test_marked_functions_in_source_order() {
        let module = SourceModule::parse(SERVICE).unwrap();
        let marked = PythonExtractor::marked_functions(&module, "ExtractFunctionToFile");
        assert_eq!(marked, vec!["read_root", "read_item", "create_item"]);
    }

    #[test]
    fn test_marked_functions_ignore_nested_and_classes() {
        let code = r#"
@Marker
class NotAFunction:
    pass

def outer():
    @Marker
    def nested():
        pass

@pkg.Marker()
def dotted():
    pass
"#;
        let module = SourceModule::parse(code).unwrap();
        assert_eq!(PythonExtractor::marked_functions(&module, "Marker"), vec!["dotted"]);
    }
}
