// Extraction Pipeline
//
// parse -> symbol table -> closure -> emit -> prune -> write
//
// Every request parses the module afresh and owns all of its intermediate state,
// so distinct entries can be extracted in parallel from one `Extractor`.

use crate::config::ExtractConfig;
use crate::emit::{CodeEmitter, DeadImportPruner, EmittedUnit};
use crate::error::Result;
use crate::extractors::ExtractorManager;
use crate::graph::resolve_closure;
use crate::utils::file_utils::read_file_content;
use crate::utils::paths::output_path;
use crate::writer::{write_output, WriteOutcome};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Configured entry point for extraction requests
pub struct Extractor {
    config: ExtractConfig,
    manager: ExtractorManager,
}

impl Default for Extractor {
    fn default() -> Self {
        Self {
            config: ExtractConfig::default(),
            manager: ExtractorManager::new(),
        }
    }
}

impl Extractor {
    /// Create an extractor, rejecting an invalid configuration
    pub fn new(config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            manager: ExtractorManager::new(),
        })
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    fn marker(&self) -> &str {
        &self.config.marker_name
    }

    /// Build the pruned unit for `entry` without touching the filesystem
    pub fn extract_unit(&self, source: &str, entry: &str) -> Result<EmittedUnit> {
        let module = self.manager.parse_module(source)?;
        let table = self.manager.build_symbol_table(&module);
        let closure = resolve_closure(&table, entry, self.marker())?;
        debug!(
            "Closure of '{}': {} names, {} unresolved",
            entry,
            closure.len(),
            closure.unresolved().len()
        );

        let unit = CodeEmitter::new(&module, &table, self.marker()).emit(&closure)?;
        DeadImportPruner::new().prune(unit)
    }

    /// Extract `entry` and write it to `<output_dir>/<entry>.<ext>`
    pub fn extract(&self, source: &str, entry: &str, output_dir: &Path) -> Result<EmittedUnit> {
        let mut unit = self.extract_unit(source, entry)?;
        let path = output_path(output_dir, entry, &self.config.output_extension);

        match write_output(&path, &unit.source, self.config.skip_unchanged)? {
            WriteOutcome::Written => info!("Extracted '{}' to {:?}", entry, path),
            WriteOutcome::Unchanged => debug!("'{}' already up to date at {:?}", entry, path),
        }

        unit.output_path = Some(path);
        Ok(unit)
    }

    /// Extract every marked function of a module, one file each
    ///
    /// Entries are processed in parallel; the result keeps source order. The first
    /// failing entry aborts the batch with its error.
    pub fn extract_marked(&self, source: &str, output_dir: &Path) -> Result<Vec<EmittedUnit>> {
        let entries = self.scan_marked_symbols(source)?;
        info!(
            "Extracting {} functions marked with @{}",
            entries.len(),
            self.marker()
        );

        entries
            .par_iter()
            .map(|entry| self.extract(source, entry, output_dir))
            .collect()
    }

    /// Top-level functions carrying the configured marker, in source order
    pub fn scan_marked_symbols(&self, source: &str) -> Result<Vec<String>> {
        self.manager.scan_marked_symbols(source, self.marker())
    }

    /// Read a module from disk and extract `entries` (all marked functions when empty)
    pub fn extract_file(
        &self,
        path: &Path,
        entries: &[String],
        output_dir: &Path,
    ) -> Result<Vec<EmittedUnit>> {
        let source = read_file_content(path)?;
        if entries.is_empty() {
            return self.extract_marked(&source, output_dir);
        }

        entries
            .par_iter()
            .map(|entry| self.extract(&source, entry, output_dir))
            .collect()
    }
}

/// Extract one entry with the default configuration
pub fn extract(source: &str, entry: &str, output_dir: &Path) -> Result<EmittedUnit> {
    Extractor::default().extract(source, entry, output_dir)
}

/// List functions decorated with `marker`, in source order
pub fn scan_marked_symbols(source: &str, marker: &str) -> Result<Vec<String>> {
    ExtractorManager::new().scan_marked_symbols(source, marker)
}
