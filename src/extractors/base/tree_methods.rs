// Tree navigation methods for SourceModule

use super::source::SourceModule;
use tree_sitter::Node;

impl SourceModule {
    /// First `ERROR` or `MISSING` node in document order
    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    pub fn find_first_error<'a>(&self, node: &Node<'a>) -> Option<Node<'a>> {
        if node.is_error() || node.is_missing() {
            return Some(*node);
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.has_error() || child.is_missing() {
                if let Some(found) = self.find_first_error(&child) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Get children of type
    pub fn get_children_of_type<'a>(&self, node: &Node<'a>, child_type: &str) -> Vec<Node<'a>> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == child_type)
            .collect()
    }

    /// Get field text safely
    pub fn get_field_text(&self, node: &Node, field_name: &str) -> Option<String> {
        node.child_by_field_name(field_name)
            .map(|field_node| self.get_node_text(&field_node))
    }
}
