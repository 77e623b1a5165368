/// Helper utilities for Python symbol extraction
/// Includes AST navigation and dotted-name handling
use tree_sitter::Node;

/// Whether `child` is the node stored under `field` of `parent`
pub fn is_field(parent: &Node, field: &str, child: &Node) -> bool {
    parent
        .child_by_field_name(field)
        .map(|field_node| field_node.id() == child.id())
        .unwrap_or(false)
}

/// Unwrap a `decorated_definition` to the definition it decorates
pub fn definition_of<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    match node.kind() {
        "decorated_definition" => node.child_by_field_name("definition"),
        "function_definition" | "class_definition" => Some(*node),
        _ => None,
    }
}

/// Collapse whitespace inside a dotted name (`a . b` -> `a.b`)
pub fn normalize_dotted(text: &str) -> String {
    text.split_whitespace().collect()
}

/// First segment of a dotted name (`os.path` -> `os`)
pub fn dotted_root(text: &str) -> String {
    normalize_dotted(text)
        .split('.')
        .next()
        .unwrap_or_default()
        .to_string()
}
