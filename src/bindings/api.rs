// API Functions - PyO3-exposed functions for Python
//
// These functions let the hosting service extract units at decoration time.
// Extraction runs with the GIL released.

use super::PyEmittedUnit;
use crate::config::ExtractConfig;
use crate::error::ExtractError;
use crate::pipeline::Extractor;
use pyo3::exceptions::{PyKeyError, PyOSError, PyRuntimeError, PySyntaxError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use std::path::PathBuf;

/// Map extraction errors onto the closest built-in Python exception
fn to_py_err(err: ExtractError) -> PyErr {
    let message = err.to_string();
    match err {
        ExtractError::Parse { .. } => PySyntaxError::new_err(message),
        ExtractError::SymbolNotFound { .. } => PyKeyError::new_err(message),
        ExtractError::NotAFunction { .. } => PyTypeError::new_err(message),
        ExtractError::Io { .. } => PyOSError::new_err(message),
        ExtractError::EmissionInvalid { .. } => PyRuntimeError::new_err(message),
        ExtractError::InvalidConfig(_) => PyValueError::new_err(message),
    }
}

fn extractor_for(marker: Option<String>) -> PyResult<Extractor> {
    let config = marker.map(ExtractConfig::with_marker).unwrap_or_default();
    Extractor::new(config).map_err(to_py_err)
}

/// Extract one entry function into `<output_dir>/<entry_symbol>.py`
///
/// Args:
///     module_source (str): Full text of the module containing the entry
///     entry_symbol (str): Name of the top-level function to extract
///     output_dir (str): Directory receiving the emitted file (created if missing)
///     marker (str | None): Marker decorator name (default "ExtractFunctionToFile")
///
/// Returns:
///     EmittedUnit: The emitted source and its metadata
///
/// Raises:
///     SyntaxError: If the module does not parse
///     KeyError: If `entry_symbol` is not defined at module top level
///     TypeError: If `entry_symbol` is not a function
///     OSError: If the output cannot be written
#[pyfunction]
#[pyo3(signature = (module_source, entry_symbol, output_dir, marker=None))]
pub fn extract(
    py: Python<'_>,
    module_source: String,
    entry_symbol: String,
    output_dir: String,
    marker: Option<String>,
) -> PyResult<PyEmittedUnit> {
    let extractor = extractor_for(marker)?;
    let output_dir = PathBuf::from(output_dir);

    let unit = py
        .detach(move || extractor.extract(&module_source, &entry_symbol, &output_dir))
        .map_err(to_py_err)?;

    Ok(PyEmittedUnit::from_unit(unit))
}

/// Extract every marked function of a module, one file each
///
/// Entries are extracted in parallel; results follow source order.
///
/// Args:
///     module_source (str): Full text of the module
///     output_dir (str): Directory receiving the emitted files
///     marker (str | None): Marker decorator name (default "ExtractFunctionToFile")
///
/// Returns:
///     list[EmittedUnit]: One unit per marked function
#[pyfunction]
#[pyo3(signature = (module_source, output_dir, marker=None))]
pub fn extract_marked(
    py: Python<'_>,
    module_source: String,
    output_dir: String,
    marker: Option<String>,
) -> PyResult<Vec<PyEmittedUnit>> {
    let extractor = extractor_for(marker)?;
    let output_dir = PathBuf::from(output_dir);

    let units = py
        .detach(move || extractor.extract_marked(&module_source, &output_dir))
        .map_err(to_py_err)?;

    Ok(units.into_iter().map(PyEmittedUnit::from_unit).collect())
}

/// List top-level functions decorated with the marker, in source order
///
/// Args:
///     module_source (str): Full text of the module
///     marker_name (str | None): Marker decorator name (default "ExtractFunctionToFile")
///
/// Returns:
///     list[str]: Function names
///
/// Raises:
///     SyntaxError: If the module does not parse
#[pyfunction]
#[pyo3(signature = (module_source, marker_name=None))]
pub fn scan_marked_symbols(module_source: &str, marker_name: Option<String>) -> PyResult<Vec<String>> {
    let extractor = extractor_for(marker_name)?;
    extractor.scan_marked_symbols(module_source).map_err(to_py_err)
}
