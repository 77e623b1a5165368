// Code Emitter
//
// Renders a closure into three sections: import statements, dependency definitions,
// then the entry function. Statements are copied verbatim from the module; only
// decorators are dropped (all of them on dependencies, the marker on the entry).

use super::EmittedUnit;
use crate::error::{ExtractError, Result};
use crate::extractors::base::{Decorator, SourceModule, StatementId, SymbolTable};
use crate::extractors::python::helpers::definition_of;
use crate::graph::DependencyClosure;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use tree_sitter::Node;

/// Emits one unit from a parsed module, its table and a closure
pub struct CodeEmitter<'a> {
    module: &'a SourceModule,
    table: &'a SymbolTable,
    marker: &'a str,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(module: &'a SourceModule, table: &'a SymbolTable, marker: &'a str) -> Self {
        Self {
            module,
            table,
            marker,
        }
    }

    /// Render `closure` to text; the result has not been pruned yet
    pub fn emit(&self, closure: &DependencyClosure) -> Result<EmittedUnit> {
        let entry = closure.entry();
        let entry_symbol = self
            .table
            .get(entry)
            .ok_or_else(|| ExtractError::SymbolNotFound {
                name: entry.to_string(),
            })?;

        let statements = self.module.statements();

        // Group closure names by defining statement; one statement may bind several
        let mut import_statements: BTreeSet<StatementId> = BTreeSet::new();
        let mut definition_statements: BTreeMap<StatementId, Vec<String>> = BTreeMap::new();
        for name in closure.names() {
            if name == entry {
                continue;
            }
            let symbol = match self.table.get(name) {
                Some(symbol) => symbol,
                None => continue,
            };
            if symbol.is_import() {
                import_statements.extend(self.table.import_statements(name));
            } else {
                definition_statements
                    .entry(symbol.statement)
                    .or_default()
                    .push(name.clone());
            }
        }

        import_statements.extend(self.table.future_imports().iter().copied());
        if !closure.unresolved().is_empty() {
            // A wildcard import may be what binds an unresolved name
            import_statements.extend(self.table.wildcard_imports().iter().copied());
        }

        let mut imports = Vec::with_capacity(import_statements.len());
        for id in &import_statements {
            let node = self.statement_node(&statements, *id, entry)?;
            imports.push(self.module.get_node_text(&node));
        }

        let mut definitions = Vec::with_capacity(definition_statements.len());
        let mut definition_names = Vec::new();
        for (id, names) in &definition_statements {
            if *id == entry_symbol.statement {
                continue;
            }
            let node = self.statement_node(&statements, *id, entry)?;
            definitions.push(self.undecorated_text(&node));
            definition_names.extend(names.iter().cloned());
        }

        let entry_node = self.statement_node(&statements, entry_symbol.statement, entry)?;
        let entry_text = self.entry_text(&entry_node, entry_symbol.retained_decorators(self.marker));

        let sections: Vec<String> = vec![imports.join("\n"), definitions.join("\n\n"), entry_text]
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect();
        let source = format!("{}\n", sections.join("\n\n"));

        debug!(
            "Emitted '{}': {} import statements, {} definitions",
            entry,
            imports.len(),
            definitions.len()
        );

        Ok(EmittedUnit {
            entry: entry.to_string(),
            source,
            definitions: definition_names,
            removed_imports: Vec::new(),
            unresolved: closure.unresolved().iter().cloned().collect(),
            output_path: None,
        })
    }

    fn statement_node<'m>(
        &self,
        statements: &[Node<'m>],
        id: StatementId,
        entry: &str,
    ) -> Result<Node<'m>> {
        statements
            .get(id.0)
            .copied()
            .ok_or_else(|| ExtractError::EmissionInvalid {
                entry: entry.to_string(),
                reason: format!("statement {} is not part of the module", id.0),
            })
    }

    /// Statement text with every decorator stripped
    fn undecorated_text(&self, node: &Node) -> String {
        match definition_of(node) {
            Some(definition) => self.module.get_node_text(&definition),
            None => self.module.get_node_text(node),
        }
    }

    /// Entry definition preceded by its retained decorators
    fn entry_text<'d>(
        &self,
        node: &Node,
        retained: impl Iterator<Item = &'d Decorator>,
    ) -> String {
        let mut lines: Vec<String> = retained.map(|decorator| decorator.text.clone()).collect();
        lines.push(self.undecorated_text(node));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::python::PythonExtractor;
    use crate::graph::resolve_closure;

    const MARKER: &str = "ExtractFunctionToFile";

    fn emit(code: &str, entry: &str) -> EmittedUnit {
        let module = SourceModule::parse(code).unwrap();
        let table = PythonExtractor::new(&module).extract_symbols();
        let closure = resolve_closure(&table, entry, MARKER).unwrap();
        CodeEmitter::new(&module, &table, MARKER).emit(&closure).unwrap()
    }

    #[test]
    fn test_sections_in_order() {
        let code = r#"import math

K = math.pi

def unused():
    return 0

def g():
    return K

def f():
    return g() + math.e
"#;
        let unit = emit(code, "f");
        assert_eq!(
            unit.source,
            "import math\n\nK = math.pi\n\ndef g():\n    return K\n\ndef f():\n    return g() + math.e\n"
        );
        assert_eq!(unit.definitions, vec!["K", "g"]);
    }

    #[test]
    fn test_entry_only() {
        let unit = emit("import os\n\ndef f(x):\n    return len(x)\n", "f");
        assert_eq!(unit.source, "def f(x):\n    return len(x)\n");
        assert!(unit.definitions.is_empty());
        // parameters are local and `len` is a builtin
        assert!(unit.unresolved.is_empty());
    }

    #[test]
    fn test_decorator_asymmetry() {
        let code = r#"from functools import lru_cache
from demonfaas import ExtractFunctionToFile
from service import app

@lru_cache(maxsize=None)
def helper():
    return 1

@ExtractFunctionToFile
@app.get("/")
def root():
    return helper()
"#;
        let unit = emit(code, "root");
        assert_eq!(
            unit.source,
            "from service import app\n\ndef helper():\n    return 1\n\n@app.get(\"/\")\ndef root():\n    return helper()\n"
        );
    }

    #[test]
    fn test_shared_import_statement_emitted_once() {
        let code = "from fastapi import FastAPI, HTTPException\n\napp = FastAPI()\n\ndef f():\n    raise HTTPException(404)\n\ndef g():\n    return app, f\n";
        let unit = emit(code, "g");
        assert_eq!(unit.source.matches("from fastapi import").count(), 1);
        assert!(unit.source.starts_with("from fastapi import FastAPI, HTTPException\n\n"));
    }

    #[test]
    fn test_every_import_of_a_shared_root_is_emitted() {
        let code = "import xml.dom.minidom\nimport xml.etree.ElementTree\nimport os\n\ndef f(text):\n    return xml.dom.minidom.parseString(text)\n";
        let unit = emit(code, "f");
        assert_eq!(
            unit.source,
            "import xml.dom.minidom\nimport xml.etree.ElementTree\n\ndef f(text):\n    return xml.dom.minidom.parseString(text)\n"
        );
    }

    #[test]
    fn test_future_import_always_emitted() {
        let unit = emit(
            "from __future__ import annotations\nimport os\n\ndef f() -> int:\n    return 1\n",
            "f",
        );
        assert_eq!(
            unit.source,
            "from __future__ import annotations\n\ndef f() -> int:\n    return 1\n"
        );
    }

    #[test]
    fn test_wildcard_import_kept_for_unresolved_names() {
        let unit = emit("from helpers import *\n\ndef f():\n    return shout()\n", "f");
        assert!(unit.source.starts_with("from helpers import *\n\n"));

        let unit = emit("from helpers import *\n\ndef f():\n    return 1\n", "f");
        assert_eq!(unit.source, "def f():\n    return 1\n");

        let unit = emit("from helpers import *\n\ndef f(x):\n    return str(x)\n", "f");
        assert_eq!(unit.source, "def f(x):\n    return str(x)\n");
        assert!(unit.unresolved.is_empty());
    }

    #[test]
    fn test_async_entry() {
        let unit = emit("async def f():\n    return 1\n", "f");
        assert_eq!(unit.source, "async def f():\n    return 1\n");
    }
}
