// Base Extractor Types
//
// All data structures for the symbol table: statement identity, symbol kinds,
// decorators and the name -> symbol mapping.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Identity of a top-level statement: its index among the module's statements
///
/// Several symbols can share one statement (`from m import a, b`, `x, y = 1, 2`);
/// emission deduplicates on this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementId(pub usize);

/// Symbol kinds recognised at module top level
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Function,
    Class,
    Variable,
    ImportAlias,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Function => write!(f, "function"),
            SymbolKind::Class => write!(f, "class"),
            SymbolKind::Variable => write!(f, "variable"),
            SymbolKind::ImportAlias => write!(f, "import alias"),
        }
    }
}

/// A decorator attached to a top-level function or class
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Decorator {
    /// Full decorator source, including the leading `@`
    pub text: String,
    /// Dotted callee name with call arguments removed
    /// e.g. `@app.get("/items")` -> `app.get`
    pub name: String,
    /// Names referenced by the decorator expression
    pub references: BTreeSet<String>,
}

impl Decorator {
    /// Whether this decorator is the extraction marker
    ///
    /// Matches `@Marker`, `@Marker(...)`, `@pkg.Marker` and `@pkg.Marker(...)`.
    pub fn matches_marker(&self, marker: &str) -> bool {
        self.name == marker || self.name.rsplit('.').next() == Some(marker)
    }
}

/// A name bound at module top level
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopLevelSymbol {
    /// Bound name as it appears in code
    pub name: String,
    pub kind: SymbolKind,
    /// Statement that binds the name
    pub statement: StatementId,
    /// Free identifiers referenced by the statement body (own decorators excluded)
    pub referenced_names: BTreeSet<String>,
    /// Decorators, for functions and classes
    pub decorators: Vec<Decorator>,
}

impl TopLevelSymbol {
    pub fn is_import(&self) -> bool {
        self.kind == SymbolKind::ImportAlias
    }

    /// Decorators that survive on the entry function once the marker is stripped
    pub fn retained_decorators<'a>(&'a self, marker: &'a str) -> impl Iterator<Item = &'a Decorator> {
        self.decorators.iter().filter(move |d| !d.matches_marker(marker))
    }
}

/// Optional data attached to a symbol at creation time
#[derive(Debug, Clone, Default)]
pub struct SymbolOptions {
    pub referenced_names: BTreeSet<String>,
    pub decorators: Vec<Decorator>,
}

/// Mapping from top-level name to its binding
///
/// Later bindings of a name replace earlier ones, matching top-to-bottom shadowing.
/// Consecutive imports of one name are the exception: `import xml.dom` followed by
/// `import xml.etree` both bind `xml`, and each loads a submodule the other does not.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SymbolTable {
    symbols: HashMap<String, TopLevelSymbol>,
    /// Earlier import statements of a name whose current binding is also an import
    rebound_imports: HashMap<String, BTreeSet<StatementId>>,
    /// `from __future__ import ...` statements; always emitted
    future_imports: BTreeSet<StatementId>,
    /// `from m import *` statements; they bind nothing filterable
    wildcard_imports: BTreeSet<StatementId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning the binding it shadows (if any)
    pub fn insert(&mut self, symbol: TopLevelSymbol) -> Option<TopLevelSymbol> {
        let name = symbol.name.clone();
        let is_import = symbol.is_import();
        let shadowed = self.symbols.insert(name.clone(), symbol);

        match &shadowed {
            Some(previous) if is_import && previous.is_import() => {
                self.rebound_imports
                    .entry(name)
                    .or_default()
                    .insert(previous.statement);
            }
            _ => {
                self.rebound_imports.remove(&name);
            }
        }
        shadowed
    }

    pub fn get(&self, name: &str) -> Option<&TopLevelSymbol> {
        self.symbols.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Every import statement the current binding of `name` relies on
    ///
    /// Empty unless `name` is currently bound by an import.
    pub fn import_statements(&self, name: &str) -> BTreeSet<StatementId> {
        let current = match self.get(name) {
            Some(symbol) if symbol.is_import() => symbol.statement,
            _ => return BTreeSet::new(),
        };
        let mut statements = self.rebound_imports.get(name).cloned().unwrap_or_default();
        statements.insert(current);
        statements
    }

    pub fn record_future_import(&mut self, statement: StatementId) {
        self.future_imports.insert(statement);
    }

    pub fn record_wildcard_import(&mut self, statement: StatementId) {
        self.wildcard_imports.insert(statement);
    }

    pub fn future_imports(&self) -> &BTreeSet<StatementId> {
        &self.future_imports
    }

    pub fn wildcard_imports(&self) -> &BTreeSet<StatementId> {
        &self.wildcard_imports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decorator(name: &str) -> Decorator {
        Decorator {
            text: format!("@{}", name),
            name: name.to_string(),
            references: BTreeSet::new(),
        }
    }

    fn symbol(name: &str, statement: usize) -> TopLevelSymbol {
        TopLevelSymbol {
            name: name.to_string(),
            kind: SymbolKind::Variable,
            statement: StatementId(statement),
            referenced_names: BTreeSet::new(),
            decorators: Vec::new(),
        }
    }

    fn import_alias(name: &str, statement: usize) -> TopLevelSymbol {
        TopLevelSymbol {
            kind: SymbolKind::ImportAlias,
            ..symbol(name, statement)
        }
    }

    #[test]
    fn test_marker_matching_forms() {
        assert!(decorator("ExtractFunctionToFile").matches_marker("ExtractFunctionToFile"));
        assert!(decorator("demonfaas.ExtractFunctionToFile").matches_marker("ExtractFunctionToFile"));
        assert!(!decorator("app.get").matches_marker("ExtractFunctionToFile"));
        assert!(!decorator("ExtractFunctionToFileX").matches_marker("ExtractFunctionToFile"));
    }

    #[test]
    fn test_last_binding_wins() {
        let mut table = SymbolTable::new();
        assert!(table.insert(symbol("x", 0)).is_none());
        let shadowed = table.insert(symbol("x", 3));
        assert_eq!(shadowed.map(|s| s.statement), Some(StatementId(0)));
        assert_eq!(table.get("x").map(|s| s.statement), Some(StatementId(3)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_consecutive_imports_of_one_name_are_all_kept() {
        let mut table = SymbolTable::new();
        table.insert(import_alias("xml", 0));
        table.insert(import_alias("xml", 2));
        let statements: Vec<StatementId> = table.import_statements("xml").into_iter().collect();
        assert_eq!(statements, vec![StatementId(0), StatementId(2)]);
        assert_eq!(table.get("xml").map(|s| s.statement), Some(StatementId(2)));
    }

    #[test]
    fn test_non_import_binding_resets_import_statements() {
        let mut table = SymbolTable::new();
        table.insert(import_alias("xml", 0));
        table.insert(symbol("xml", 1));
        assert!(table.import_statements("xml").is_empty());

        table.insert(import_alias("xml", 2));
        let statements: Vec<StatementId> = table.import_statements("xml").into_iter().collect();
        assert_eq!(statements, vec![StatementId(2)]);
    }
}
