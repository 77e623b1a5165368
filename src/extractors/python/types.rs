/// Class extraction
/// Handles plain, inheriting and decorated (e.g. @dataclass) classes
use super::identifiers::collect_references;
use super::PythonExtractor;
use crate::extractors::base::{Decorator, StatementId, SymbolKind, SymbolOptions, TopLevelSymbol};
use tree_sitter::Node;

/// Extract a top-level class definition
///
/// Base classes, keyword arguments (`metaclass=...`) and the whole body count as
/// references.
pub fn extract_class(
    extractor: &mut PythonExtractor,
    node: Node,
    statement: StatementId,
    decorators: Vec<Decorator>,
) -> Option<TopLevelSymbol> {
    let name = extractor.base().module.get_field_text(&node, "name")?;
    let referenced_names = collect_references(extractor.base().module, &node);

    Some(extractor.base_mut().create_symbol(
        name,
        SymbolKind::Class,
        statement,
        SymbolOptions {
            referenced_names,
            decorators,
        },
    ))
}

#[cfg(test)]
mod tests {
    use crate::extractors::base::{SourceModule, SymbolKind};
    use crate::extractors::python::PythonExtractor;

    #[test]
    fn test_class_references_bases_and_fields() {
        let code = r#"
class Item(BaseModel, metaclass=Registry):
    name: str = Field(..., min_length=3)
    created_at: datetime = Field(default_factory=datetime.utcnow)

    def describe(self):
        return format_item(self)
"#;
        let module = SourceModule::parse(code).unwrap();
        let table = PythonExtractor::new(&module).extract_symbols();
        let symbol = table.get("Item").unwrap();

        assert_eq!(symbol.kind, SymbolKind::Class);
        for expected in ["BaseModel", "Registry", "Field", "datetime", "format_item", "str"] {
            assert!(
                symbol.referenced_names.contains(expected),
                "missing reference {}",
                expected
            );
        }
        assert!(!symbol.referenced_names.contains("metaclass"));
        // class attributes are bound by the class body
        assert!(!symbol.referenced_names.contains("name"));
        assert!(!symbol.referenced_names.contains("describe"));
        assert!(!symbol.referenced_names.contains("utcnow"));
    }

    #[test]
    fn test_decorated_class() {
        let module =
            SourceModule::parse("@dataclass\nclass Point:\n    x: int = 0\n").unwrap();
        let table = PythonExtractor::new(&module).extract_symbols();
        let symbol = table.get("Point").unwrap();
        assert_eq!(symbol.decorators[0].name, "dataclass");
        assert!(!symbol.referenced_names.contains("dataclass"));
    }
}
