// faas_extract - minimal per-function Python units for FaaS packaging
//
// Parses a Python module with tree-sitter, computes the top-level definitions and
// imports an entry function transitively needs, and emits them as a standalone
// module. Built as an rlib for the CLI and, with the `python` feature, as a PyO3
// extension module for the hosting service.

pub mod config;
pub mod emit;
pub mod error;
pub mod extractors;
pub mod graph;
pub mod language;
pub mod pipeline;
pub mod utils;
pub mod writer;

// PyO3 bindings layer
#[cfg(feature = "python")]
pub mod bindings;

pub use config::ExtractConfig;
pub use emit::EmittedUnit;
pub use error::{ExtractError, Result};
pub use pipeline::{extract, scan_marked_symbols, Extractor};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// faas_extract Python module
///
/// Extracts decorated entry functions into standalone source files.
#[cfg(feature = "python")]
#[pymodule]
fn faas_extract(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add("DEFAULT_MARKER", config::DEFAULT_MARKER)?;

    // Add Python functions
    m.add_function(wrap_pyfunction!(bindings::extract, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::extract_marked, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::scan_marked_symbols, m)?)?;

    // Add Python classes
    m.add_class::<bindings::PyEmittedUnit>()?;

    Ok(())
}
