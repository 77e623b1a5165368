// PyEmittedUnit - PyO3 wrapper for EmittedUnit
//
// Read-only view of one extracted unit for the hosting Python process.

use crate::emit::EmittedUnit;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Python-accessible EmittedUnit wrapper
///
/// The standalone source produced for one entry function, plus what went into it.
/// All fields are read-only from Python.
#[pyclass(name = "EmittedUnit")]
pub struct PyEmittedUnit {
    inner: EmittedUnit,
}

impl PyEmittedUnit {
    pub fn from_unit(unit: EmittedUnit) -> Self {
        PyEmittedUnit { inner: unit }
    }
}

#[pymethods]
impl PyEmittedUnit {
    #[getter]
    fn entry(&self) -> String {
        self.inner.entry.clone()
    }

    #[getter]
    fn source(&self) -> String {
        self.inner.source.clone()
    }

    /// Dependency definitions emitted before the entry, in source order
    #[getter]
    fn definitions(&self) -> Vec<String> {
        self.inner.definitions.clone()
    }

    #[getter]
    fn removed_imports(&self) -> Vec<String> {
        self.inner.removed_imports.clone()
    }

    /// Names the unit reads without defining (builtins, runtime names)
    #[getter]
    fn unresolved(&self) -> Vec<String> {
        self.inner.unresolved.clone()
    }

    #[getter]
    fn output_path(&self) -> Option<String> {
        self.inner
            .output_path
            .as_ref()
            .map(|path| path.to_string_lossy().into_owned())
    }

    /// blake3 hex digest of `source`
    #[getter]
    fn content_hash(&self) -> String {
        self.inner.content_hash()
    }

    /// Serialize the unit to a JSON string
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner)
            .map_err(|e| PyValueError::new_err(format!("Serialization failed: {}", e)))
    }

    fn __repr__(&self) -> String {
        format!(
            "EmittedUnit(entry='{}', definitions={}, removed_imports={})",
            self.inner.entry,
            self.inner.definitions.len(),
            self.inner.removed_imports.len()
        )
    }
}
