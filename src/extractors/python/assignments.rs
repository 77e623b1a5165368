/// Variable and constant assignment extraction
/// Handles plain, annotated, chained and unpacking assignments at module level
use super::identifiers::{collect_references, collect_targets};
use super::PythonExtractor;
use crate::extractors::base::{StatementId, SymbolKind, SymbolOptions, TopLevelSymbol};
use std::collections::BTreeSet;
use tree_sitter::Node;

/// Extract an assignment statement - can return multiple symbols for unpacking
///
/// Handles `x = 5`, `x: int = 5`, `x: int`, `a, b = 1, 2` and `a = b = 1`.
/// Attribute and subscript targets bind nothing; such statements yield no symbols.
pub(super) fn extract_assignment(
    extractor: &mut PythonExtractor,
    node: Node,
    statement: StatementId,
) -> Vec<TopLevelSymbol> {
    let assignment = match node.named_child(0) {
        Some(child) if child.kind() == "assignment" => child,
        _ => return vec![],
    };

    let module = extractor.base().module;
    let mut targets: Vec<String> = Vec::new();
    let mut referenced_names = BTreeSet::new();

    // Walk the chain `a = b = value`: each level has a left side and maybe a type
    let mut current = Some(assignment);
    while let Some(level) = current {
        if let Some(left) = level.child_by_field_name("left") {
            collect_targets(module, &left, &mut targets);
        }
        if let Some(type_node) = level.child_by_field_name("type") {
            referenced_names.extend(collect_references(module, &type_node));
        }

        current = match level.child_by_field_name("right") {
            Some(right) if right.kind() == "assignment" => Some(right),
            Some(right) => {
                referenced_names.extend(collect_references(module, &right));
                None
            }
            None => None,
        };
    }

    let mut seen = BTreeSet::new();
    targets.retain(|name| seen.insert(name.clone()));

    targets
        .into_iter()
        .map(|name| {
            extractor.base_mut().create_symbol(
                name,
                SymbolKind::Variable,
                statement,
                SymbolOptions {
                    referenced_names: referenced_names.clone(),
                    decorators: Vec::new(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::extractors::base::{SourceModule, SymbolTable};
    use crate::extractors::python::PythonExtractor;

    fn table_of(code: &str) -> SymbolTable {
        let module = SourceModule::parse(code).unwrap();
        PythonExtractor::new(&module).extract_symbols()
    }

    fn refs(table: &SymbolTable, name: &str) -> Vec<String> {
        table.get(name).unwrap().referenced_names.iter().cloned().collect()
    }

    #[test]
    fn test_simple_and_annotated_assignments() {
        let table = table_of("app = FastAPI()\nTIMEOUT: Seconds = DEFAULT_TIMEOUT * 2\n");
        assert_eq!(refs(&table, "app"), vec!["FastAPI"]);
        assert_eq!(refs(&table, "TIMEOUT"), vec!["DEFAULT_TIMEOUT", "Seconds"]);
    }

    #[test]
    fn test_unpacking_shares_statement() {
        let table = table_of("x, (y, *rest) = compute()\n");
        let statement = table.get("x").unwrap().statement;
        assert_eq!(table.get("y").unwrap().statement, statement);
        assert_eq!(table.get("rest").unwrap().statement, statement);
        assert_eq!(refs(&table, "rest"), vec!["compute"]);
    }

    #[test]
    fn test_chained_assignment_binds_every_target() {
        let table = table_of("a = b = make()\n");
        assert!(table.contains("a"));
        assert!(table.contains("b"));
        assert_eq!(refs(&table, "a"), vec!["make"]);
    }

    #[test]
    fn test_targets_are_not_self_references() {
        let table = table_of("counter = 0\n");
        assert!(refs(&table, "counter").is_empty());
    }

    #[test]
    fn test_attribute_targets_bind_nothing() {
        let table = table_of("app.debug = True\nsettings['x'] = 1\n");
        assert!(table.is_empty());
    }
}
