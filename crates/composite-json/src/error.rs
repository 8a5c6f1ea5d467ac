//! Error types for composite JSON construction and decoding.

use crate::path::DecodePath;
use thiserror::Error;

/// Errors that can occur while building or decoding a [`JsonValue`](crate::JsonValue).
///
/// The dynamic-tree bridge does not use this type: a failed structural probe there is
/// reported as `None`.
#[derive(Error, Debug)]
pub enum CompositeError {
    /// The input text was not valid JSON, or serde_json failed to write output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A decoded value matched neither the object shape nor the array shape.
    /// `path` is where the decode attempt started, `$` being the value being decoded.
    #[error("type mismatch at {path}: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
        path: DecodePath,
    },

    /// Object construction from entries that were required to have unique keys.
    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),

    /// A dynamic tree node was neither a sequence nor a string-keyed mapping.
    #[error("not a composite JSON value (found {found})")]
    NotComposite { found: &'static str },

    /// The underlying serde format reported an error while reading its input.
    #[error("format error: {0}")]
    Format(String),
}

/// Convenience alias used throughout composite-json.
pub type Result<T> = std::result::Result<T, CompositeError>;
