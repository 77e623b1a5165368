// Dead-Import Pruner
//
// Second pass over an emitted unit. The emitter keeps whole import statements when
// any alias is needed, so `from m import a, b` can arrive with `b` unused. The pruner
// re-parses the unit, drops aliases nothing reads and re-renders partial statements.

use super::EmittedUnit;
use crate::error::{ExtractError, Result};
use crate::extractors::base::SourceModule;
use crate::extractors::python::{collect_references, import_bindings, is_wildcard_import, render_import};
use std::collections::BTreeSet;
use tracing::debug;

/// Result of pruning one source text
#[derive(Debug, Clone, PartialEq)]
pub struct PrunedSource {
    pub source: String,
    /// Bound names of the removed aliases, in source order
    pub removed: Vec<String>,
}

/// One byte-range replacement in the emitted text
struct Edit {
    start: usize,
    end: usize,
    replacement: String,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DeadImportPruner;

impl DeadImportPruner {
    pub fn new() -> Self {
        Self
    }

    /// Prune an emitted unit in place of its source text
    pub fn prune(&self, mut unit: EmittedUnit) -> Result<EmittedUnit> {
        let pruned = self.prune_source(&unit.entry, &unit.source)?;
        unit.source = pruned.source;
        unit.removed_imports = pruned.removed;
        Ok(unit)
    }

    /// Remove unreferenced import aliases from `source`
    ///
    /// `entry` only labels errors. `__future__` and wildcard imports are never touched.
    pub fn prune_source(&self, entry: &str, source: &str) -> Result<PrunedSource> {
        let module = parse_emitted(entry, source)?;
        let statements = module.statements();

        let mut referenced: BTreeSet<String> = BTreeSet::new();
        for node in &statements {
            if !is_prunable_import(node.kind()) && node.kind() != "future_import_statement" {
                referenced.extend(collect_references(&module, node));
            }
        }

        let mut edits: Vec<Edit> = Vec::new();
        let mut removed: Vec<String> = Vec::new();
        for node in &statements {
            if !is_prunable_import(node.kind()) || is_wildcard_import(node) {
                continue;
            }

            let bindings = import_bindings(&module, node);
            let (kept, dropped): (Vec<_>, Vec<_>) = bindings
                .iter()
                .partition(|binding| referenced.contains(&binding.bound_name));
            if dropped.is_empty() {
                continue;
            }
            removed.extend(dropped.iter().map(|binding| binding.bound_name.clone()));

            if kept.is_empty() {
                // Remove the statement together with its line break
                let mut end = node.end_byte();
                if source.as_bytes().get(end) == Some(&b'\n') {
                    end += 1;
                }
                edits.push(Edit {
                    start: node.start_byte(),
                    end,
                    replacement: String::new(),
                });
            } else {
                edits.push(Edit {
                    start: node.start_byte(),
                    end: node.end_byte(),
                    replacement: render_import(&module, node, &kept),
                });
            }
        }

        if edits.is_empty() {
            return Ok(PrunedSource {
                source: source.to_string(),
                removed,
            });
        }

        let mut pruned = source.to_string();
        for edit in edits.iter().rev() {
            pruned.replace_range(edit.start..edit.end, &edit.replacement);
        }
        let pruned = pruned.trim_start_matches('\n').to_string();

        // Pruning must never turn a valid unit into an invalid one
        parse_emitted(entry, &pruned)?;

        debug!(
            "Pruned {} unused import aliases from '{}': {:?}",
            removed.len(),
            entry,
            removed
        );

        Ok(PrunedSource {
            source: pruned,
            removed,
        })
    }
}

fn is_prunable_import(kind: &str) -> bool {
    matches!(kind, "import_statement" | "import_from_statement")
}

fn parse_emitted(entry: &str, source: &str) -> Result<SourceModule> {
    SourceModule::parse(source).map_err(|e| ExtractError::EmissionInvalid {
        entry: entry.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prune(source: &str) -> PrunedSource {
        DeadImportPruner::new().prune_source("f", source).unwrap()
    }

    #[test]
    fn test_removes_unused_statement() {
        let pruned = prune("import os\nimport json\n\ndef f():\n    return json.dumps({})\n");
        assert_eq!(pruned.source, "import json\n\ndef f():\n    return json.dumps({})\n");
        assert_eq!(pruned.removed, vec!["os"]);
    }

    #[test]
    fn test_partial_statement_is_rerendered() {
        let pruned = prune(
            "from fastapi import FastAPI, HTTPException as HttpError\n\ndef f():\n    raise HttpError(404)\n",
        );
        assert_eq!(
            pruned.source,
            "from fastapi import HTTPException as HttpError\n\ndef f():\n    raise HttpError(404)\n"
        );
        assert_eq!(pruned.removed, vec!["FastAPI"]);
    }

    #[test]
    fn test_all_imports_removed_leaves_no_leading_blank_line() {
        let pruned = prune("import os\nfrom typing import (\n    List,\n    Dict,\n)\n\ndef f():\n    return 1\n");
        assert_eq!(pruned.source, "def f():\n    return 1\n");
        assert_eq!(pruned.removed, vec!["os", "List", "Dict"]);
    }

    #[test]
    fn test_local_binding_does_not_keep_import() {
        let pruned = prune("import data\n\ndef f():\n    data = 1\n    return data\n");
        assert_eq!(pruned.source, "def f():\n    data = 1\n    return data\n");
        assert_eq!(pruned.removed, vec!["data"]);
    }

    #[test]
    fn test_imports_sharing_a_root_are_kept_together() {
        let source = "import xml.dom\nimport xml.etree.ElementTree\n\ndef f():\n    return xml.dom\n";
        assert_eq!(prune(source).source, source);
    }

    #[test]
    fn test_decorator_references_keep_imports() {
        let source = "from service import app\n\n@app.get(\"/\")\ndef f():\n    return 1\n";
        assert_eq!(prune(source).source, source);
    }

    #[test]
    fn test_future_and_wildcard_left_alone() {
        let source = "from __future__ import annotations\nfrom helpers import *\n\ndef f():\n    return shout()\n";
        let pruned = prune(source);
        assert_eq!(pruned.source, source);
        assert!(pruned.removed.is_empty());
    }

    #[test]
    fn test_pruning_is_idempotent() {
        let once = prune("import os, json\nfrom math import pi, tau\n\ndef f():\n    return json.dumps(pi)\n");
        assert_eq!(
            once.source,
            "import json\nfrom math import pi\n\ndef f():\n    return json.dumps(pi)\n"
        );
        let twice = prune(&once.source);
        assert_eq!(twice.source, once.source);
        assert!(twice.removed.is_empty());
    }

    #[test]
    fn test_invalid_emission_is_reported() {
        let err = DeadImportPruner::new()
            .prune_source("broken", "def broken(:\n    pass\n")
            .unwrap_err();
        assert!(matches!(err, ExtractError::EmissionInvalid { ref entry, .. } if entry == "broken"));
    }
}
