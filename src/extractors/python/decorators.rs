/// Decorator extraction and handling
/// Supports plain, dotted and called decorators (`@marker`, `@pkg.marker`, `@app.get("/")`)
use super::helpers::normalize_dotted;
use super::identifiers::collect_references;
use crate::extractors::base::{Decorator, SourceModule};
use tree_sitter::Node;

/// Extract decorators from a `decorated_definition` node
///
/// Any other node kind has no decorators and yields an empty list.
pub fn extract_decorators(module: &SourceModule, node: &Node) -> Vec<Decorator> {
    let mut decorators = Vec::new();
    if node.kind() != "decorated_definition" {
        return decorators;
    }

    for child in module.get_children_of_type(node, "decorator") {
        let text = module.get_node_text(&child).trim_end().to_string();
        let name = child
            .named_child(0)
            .map(|expression| decorator_name(module, &expression))
            .unwrap_or_default();

        decorators.push(Decorator {
            text,
            name,
            references: collect_references(module, &child),
        });
    }

    decorators
}

/// Extract just the decorator name without parameters
/// e.g., `lru_cache(maxsize=128)` -> `lru_cache`
fn decorator_name(module: &SourceModule, expression: &Node) -> String {
    let callee = if expression.kind() == "call" {
        expression.child_by_field_name("function").unwrap_or(*expression)
    } else {
        *expression
    };
    normalize_dotted(&module.get_node_text(&callee))
}
