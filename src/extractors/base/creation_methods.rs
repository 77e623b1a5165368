// Symbol creation methods for BaseExtractor

use super::extractor::BaseExtractor;
use super::types::{StatementId, SymbolKind, SymbolOptions, TopLevelSymbol};
use tracing::debug;

impl BaseExtractor<'_> {
    /// Create a symbol and register it in the table
    ///
    /// A later binding of the same name replaces the earlier one.
    pub fn create_symbol(
        &mut self,
        name: String,
        kind: SymbolKind,
        statement: StatementId,
        options: SymbolOptions,
    ) -> TopLevelSymbol {
        let symbol = TopLevelSymbol {
            name,
            kind,
            statement,
            referenced_names: options.referenced_names,
            decorators: options.decorators,
        };

        if let Some(shadowed) = self.table.insert(symbol.clone()) {
            debug!(
                "'{}' rebound at statement {} (was {} at statement {})",
                symbol.name, statement.0, shadowed.kind, shadowed.statement.0
            );
        }

        symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::SourceModule;
    use std::collections::BTreeSet;

    #[test]
    fn test_create_symbol_registers_in_table() {
        let module = SourceModule::parse("x = 1\n").unwrap();
        let mut base = BaseExtractor::new("python".to_string(), &module);

        let references: BTreeSet<String> = ["y".to_string()].into_iter().collect();
        let symbol = base.create_symbol(
            "x".to_string(),
            SymbolKind::Variable,
            StatementId(0),
            SymbolOptions {
                referenced_names: references.clone(),
                decorators: Vec::new(),
            },
        );

        assert_eq!(symbol.referenced_names, references);
        let table = base.into_table();
        assert_eq!(table.get("x").map(|s| s.kind), Some(SymbolKind::Variable));
    }
}
