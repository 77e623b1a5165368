// SourceModule - parsed, read-only view of one Python module
//
// Owns the module text and its tree-sitter tree. Statements are handed out as
// borrowed nodes; `StatementId` indexes the comment-free list of top-level children.

use crate::error::{ExtractError, Result};
use crate::language::{self, PYTHON};
use tree_sitter::{Node, Tree};

/// Immutable parsed module
pub struct SourceModule {
    content: String,
    tree: Tree,
}

impl std::fmt::Debug for SourceModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceModule")
            .field("bytes", &self.content.len())
            .field("statements", &self.statements().len())
            .finish()
    }
}

impl SourceModule {
    /// Parse module text, failing on the first syntax error
    pub fn parse(content: impl Into<String>) -> Result<Self> {
        let content = content.into();

        let mut parser = language::create_parser(PYTHON).map_err(|e| ExtractError::Parse {
            line: 0,
            column: 0,
            message: e.to_string(),
        })?;

        let tree = parser
            .parse(&content, None)
            .ok_or_else(|| ExtractError::Parse {
                line: 1,
                column: 1,
                message: "parser produced no tree".to_string(),
            })?;

        let module = Self { content, tree };
        if let Some(error_node) = module.find_first_error(&module.tree.root_node()) {
            let position = error_node.start_position();
            let message = if error_node.is_missing() {
                format!("missing '{}'", error_node.kind())
            } else {
                let snippet = module.get_node_text(&error_node);
                let first_line = snippet.lines().next().unwrap_or("").trim();
                format!("unexpected '{}'", truncate_string(first_line, 40))
            };
            return Err(ExtractError::Parse {
                line: position.row + 1,
                column: position.column + 1,
                message,
            });
        }

        Ok(module)
    }

    /// Top-level statements in source order, comments excluded
    pub fn statements(&self) -> Vec<Node<'_>> {
        let root = self.tree.root_node();
        let mut cursor = root.walk();
        root.named_children(&mut cursor)
            .filter(|child| child.kind() != "comment")
            .collect()
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }
}

/// Safely truncate a string to a maximum number of characters (not bytes)
pub(crate) fn truncate_string(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect::<String>() + "..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_skip_comments() {
        let module = SourceModule::parse("# header\nimport os\n\n# note\nx = 1\n").unwrap();
        let kinds: Vec<&str> = module.statements().iter().map(|n| n.kind()).collect();
        assert_eq!(kinds, vec!["import_statement", "expression_statement"]);
        assert_eq!(module.get_node_text(&module.statements()[1]), "x = 1");
    }

    #[test]
    fn test_parse_error_reports_position() {
        let err = SourceModule::parse("import os\n\ndef broken(:\n    pass\n").unwrap_err();
        match err {
            ExtractError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_module_parses() {
        let module = SourceModule::parse("").unwrap();
        assert!(module.statements().is_empty());
    }

    #[test]
    fn test_truncate_string_respects_chars() {
        assert_eq!(truncate_string("héllo", 10), "héllo");
        assert_eq!(truncate_string("héllo wörld", 5), "héllo...");
    }
}
