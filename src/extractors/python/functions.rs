/// Function extraction
/// Handles regular and async top-level functions, decorated or not
use super::identifiers::collect_references;
use super::PythonExtractor;
use crate::extractors::base::{Decorator, StatementId, SymbolKind, SymbolOptions, TopLevelSymbol};
use tree_sitter::Node;

/// Extract a top-level function definition
///
/// `node` is the `function_definition` itself; decorators come from the enclosing
/// `decorated_definition` and are kept apart from the body references.
pub fn extract_function(
    extractor: &mut PythonExtractor,
    node: Node,
    statement: StatementId,
    decorators: Vec<Decorator>,
) -> Option<TopLevelSymbol> {
    let name = extractor.base().module.get_field_text(&node, "name")?;
    let referenced_names = collect_references(extractor.base().module, &node);

    Some(extractor.base_mut().create_symbol(
        name,
        SymbolKind::Function,
        statement,
        SymbolOptions {
            referenced_names,
            decorators,
        },
    ))
}
