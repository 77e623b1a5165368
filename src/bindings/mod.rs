// PyO3 Bindings Module
//
// Python bindings for the extraction pipeline, compiled with the `python` feature.
// Wraps EmittedUnit in a PyO3-compatible type.

mod api;
mod emitted_unit;

// Re-export for lib.rs
pub use api::{extract, extract_marked, scan_marked_symbols};
pub use emitted_unit::PyEmittedUnit;
