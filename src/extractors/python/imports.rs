/// Import statement extraction and rendering
/// Handles import, from...import, aliased, relative and wildcard imports
use super::helpers::{dotted_root, normalize_dotted};
use super::PythonExtractor;
use crate::extractors::base::{
    SourceModule, StatementId, SymbolKind, SymbolOptions, TopLevelSymbol,
};
use tree_sitter::Node;

/// One alias of an import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Name the alias binds in module scope
    pub bound_name: String,
    /// Alias as written back into an import list (`a.b as c`, `x`)
    pub rendered: String,
}

/// Extract one ImportAlias symbol per bound name of an import statement
pub fn extract_imports(
    extractor: &mut PythonExtractor,
    node: Node,
    statement: StatementId,
) -> Vec<TopLevelSymbol> {
    if is_wildcard_import(&node) {
        extractor.base_mut().table.record_wildcard_import(statement);
        return Vec::new();
    }

    let bindings = import_bindings(extractor.base().module, &node);
    bindings
        .into_iter()
        .map(|binding| {
            extractor.base_mut().create_symbol(
                binding.bound_name,
                SymbolKind::ImportAlias,
                statement,
                SymbolOptions::default(),
            )
        })
        .collect()
}

/// Whether the node is `from m import *`
pub fn is_wildcard_import(node: &Node) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.kind() == "wildcard_import");
    found
}

/// Bindings of an `import_statement` or `import_from_statement`
pub fn import_bindings(module: &SourceModule, node: &Node) -> Vec<ImportBinding> {
    let from_import = node.kind() == "import_from_statement";
    let mut bindings = Vec::new();

    let mut cursor = node.walk();
    for child in node.children_by_field_name("name", &mut cursor) {
        match child.kind() {
            "dotted_name" => {
                // `import a.b.c` binds `a`; `from m import x` binds `x`
                let name = normalize_dotted(&module.get_node_text(&child));
                let bound_name = if from_import {
                    name.clone()
                } else {
                    dotted_root(&name)
                };
                bindings.push(ImportBinding {
                    bound_name,
                    rendered: name,
                });
            }
            "aliased_import" => {
                if let Some((name, alias)) = extract_alias(module, &child) {
                    bindings.push(ImportBinding {
                        rendered: format!("{} as {}", name, alias),
                        bound_name: alias,
                    });
                }
            }
            _ => {}
        }
    }

    bindings
}

/// Extract alias from an aliased_import node
fn extract_alias(module: &SourceModule, node: &Node) -> Option<(String, String)> {
    let name = module.get_field_text(node, "name")?;
    let alias = module.get_field_text(node, "alias")?;
    if name.is_empty() || alias.is_empty() {
        return None;
    }
    Some((normalize_dotted(&name), alias))
}

/// Re-render an import statement keeping only `bindings`
pub fn render_import(module: &SourceModule, node: &Node, bindings: &[&ImportBinding]) -> String {
    let names = bindings
        .iter()
        .map(|binding| binding.rendered.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    match node.kind() {
        "import_from_statement" => {
            let module_name = module
                .get_field_text(node, "module_name")
                .map(|text| normalize_dotted(&text))
                .unwrap_or_default();
            format!("from {} import {}", module_name, names)
        }
        _ => format!("import {}", names),
    }
}
