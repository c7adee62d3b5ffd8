//! # Schema Provider Errors
//!
//! Errors raised while loading or compiling schemas. Validation failures
//! are never errors here: they are reported as issues in an `Outcome`.

use thiserror::Error;

/// Error building a schema or loading a document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The JSON Schema document could not be compiled.
    #[error("invalid JSON Schema: {reason}")]
    InvalidSchema {
        /// Reason reported by the compiler.
        reason: String,
    },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}
