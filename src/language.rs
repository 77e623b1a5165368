//! Language Support - tree-sitter language configuration
//!
//! Extraction targets Python modules only. ALL tree-sitter grammar configuration lives
//! here so the parser, the symbol table builder and the pruner agree on node kinds.

use anyhow::Result;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tree_sitter::Parser;

/// Language identifier used throughout the crate
pub const PYTHON: &str = "python";

/// Get tree-sitter language parser for a given language name
///
/// This is the SINGLE SOURCE OF TRUTH for grammar selection.
pub fn get_tree_sitter_language(language: &str) -> Result<tree_sitter::Language> {
    match language {
        "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        _ => Err(anyhow::anyhow!(
            "Unsupported language: '{}'. Supported languages: python",
            language
        )),
    }
}

/// Create a parser configured for `language`
pub fn create_parser(language: &str) -> Result<Parser> {
    let mut parser = Parser::new();
    let tree_sitter_language = get_tree_sitter_language(language)?;
    parser.set_language(&tree_sitter_language).map_err(|e| {
        anyhow::anyhow!("Failed to set parser language for {}: {}", language, e)
    })?;
    Ok(parser)
}

/// Detect language from file extension
///
/// Returns the language name that can be passed to `get_tree_sitter_language()`.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "py" | "pyw" | "pyi" => Some(PYTHON),
        _ => None,
    }
}

/// AST node types that represent import statements
///
/// `future_import_statement` is listed separately by the grammar
/// (`from __future__ import annotations`).
pub fn get_import_node_kinds(language: &str) -> Vec<&'static str> {
    match language {
        "python" => vec![
            "import_statement",
            "import_from_statement",
            "future_import_statement",
        ],
        _ => vec![],
    }
}

/// Names Python resolves from the `builtins` module when no binding shadows them
const PYTHON_BUILTINS: &[&str] = &[
    "ArithmeticError", "AssertionError", "AttributeError", "BaseException",
    "BaseExceptionGroup", "BlockingIOError", "BrokenPipeError", "BufferError",
    "BytesWarning", "ChildProcessError", "ConnectionAbortedError", "ConnectionError",
    "ConnectionRefusedError", "ConnectionResetError", "DeprecationWarning", "EOFError",
    "Ellipsis", "EncodingWarning", "EnvironmentError", "Exception", "ExceptionGroup",
    "False", "FileExistsError", "FileNotFoundError", "FloatingPointError", "FutureWarning",
    "GeneratorExit", "IOError", "ImportError", "ImportWarning", "IndentationError",
    "IndexError", "InterruptedError", "IsADirectoryError", "KeyError", "KeyboardInterrupt",
    "LookupError", "MemoryError", "ModuleNotFoundError", "NameError", "None",
    "NotADirectoryError", "NotImplemented", "NotImplementedError", "OSError",
    "OverflowError", "PendingDeprecationWarning", "PermissionError", "ProcessLookupError",
    "RecursionError", "ReferenceError", "ResourceWarning", "RuntimeError",
    "RuntimeWarning", "StopAsyncIteration", "StopIteration", "SyntaxError",
    "SyntaxWarning", "SystemError", "SystemExit", "TabError", "TimeoutError", "True",
    "TypeError", "UnboundLocalError", "UnicodeDecodeError", "UnicodeEncodeError",
    "UnicodeError", "UnicodeTranslateError", "UnicodeWarning", "UserWarning", "ValueError",
    "Warning", "ZeroDivisionError", "__build_class__", "__debug__", "__doc__", "__file__",
    "__import__", "__loader__", "__name__", "__package__", "__spec__", "abs", "aiter",
    "all", "anext", "any", "ascii", "bin", "bool", "breakpoint", "bytearray", "bytes",
    "callable", "chr", "classmethod", "compile", "complex", "copyright", "credits",
    "delattr", "dict", "dir", "divmod", "enumerate", "eval", "exec", "exit", "filter",
    "float", "format", "frozenset", "getattr", "globals", "hasattr", "hash", "help", "hex",
    "id", "input", "int", "isinstance", "issubclass", "iter", "len", "license", "list",
    "locals", "map", "max", "memoryview", "min", "next", "object", "oct", "open", "ord",
    "pow", "print", "property", "quit", "range", "repr", "reversed", "round", "set",
    "setattr", "slice", "sorted", "staticmethod", "str", "sum", "super", "tuple", "type",
    "vars", "zip",
];

static BUILTIN_NAMES: Lazy<FxHashSet<&'static str>> =
    Lazy::new(|| PYTHON_BUILTINS.iter().copied().collect());

/// Whether `name` is a Python builtin (`len`, `ValueError`, `None`, ...)
pub fn is_builtin_name(name: &str) -> bool {
    BUILTIN_NAMES.contains(name)
}
