// Dependency Closure Module
//
// Fixed-point reachability over the symbol graph of one module. An edge A -> B
// exists when B is referenced by A's statement and B is bound at module top level.
// Referenced names with no top-level binding are never followed. Builtins among them
// are dropped; the rest are recorded as unresolved (runtime or wildcard-imported).

use crate::error::{ExtractError, Result};
use crate::extractors::base::{SymbolKind, SymbolTable};
use crate::language::is_builtin_name;
use rustc_hash::FxHashSet;
use std::collections::BTreeSet;
use tracing::debug;

/// Names transitively required by one entry symbol
///
/// Built per extraction request; never shared between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyClosure {
    entry: String,
    names: BTreeSet<String>,
    unresolved: BTreeSet<String>,
}

impl DependencyClosure {
    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Every reachable name, the entry included
    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Referenced names bound neither at top level nor as builtins
    pub fn unresolved(&self) -> &BTreeSet<String> {
        &self.unresolved
    }
}

/// Compute the dependency closure of `entry`
///
/// The entry's own references include those of its decorators that survive
/// emission (every decorator except `marker`). Dependencies are emitted without
/// decorators, so only their body references are followed.
pub fn resolve_closure(table: &SymbolTable, entry: &str, marker: &str) -> Result<DependencyClosure> {
    let entry_symbol = table.get(entry).ok_or_else(|| ExtractError::SymbolNotFound {
        name: entry.to_string(),
    })?;
    if entry_symbol.kind != SymbolKind::Function {
        return Err(ExtractError::NotAFunction {
            name: entry.to_string(),
            kind: entry_symbol.kind,
        });
    }

    let mut closure: FxHashSet<String> = FxHashSet::default();
    let mut frontier: FxHashSet<String> = FxHashSet::default();
    let mut unresolved: BTreeSet<String> = BTreeSet::new();
    frontier.insert(entry.to_string());

    let mut round = 0usize;
    while !frontier.is_empty() {
        // Move the whole frontier into the closure before expanding it
        closure.extend(frontier.iter().cloned());

        let mut next: FxHashSet<String> = FxHashSet::default();
        for name in &frontier {
            let symbol = match table.get(name) {
                Some(symbol) => symbol,
                None => continue,
            };

            let mut references: Vec<&String> = symbol.referenced_names.iter().collect();
            if name == entry {
                references.extend(
                    symbol
                        .retained_decorators(marker)
                        .flat_map(|decorator| decorator.references.iter()),
                );
            }

            for reference in references {
                if !table.contains(reference) {
                    if !is_builtin_name(reference) {
                        unresolved.insert(reference.clone());
                    }
                } else if !closure.contains(reference) {
                    next.insert(reference.clone());
                }
            }
        }

        round += 1;
        debug!(
            "closure of '{}': round {} added {} names",
            entry,
            round,
            next.len()
        );
        frontier = next;
    }

    if !unresolved.is_empty() {
        debug!(
            "closure of '{}': {} unresolved references assumed external: {:?}",
            entry,
            unresolved.len(),
            unresolved
        );
    }

    Ok(DependencyClosure {
        entry: entry.to_string(),
        names: closure.into_iter().collect(),
        unresolved,
    })
}
