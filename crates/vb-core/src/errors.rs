//! Cross-cutting error types for Vaultbook.
//!
//! Storage errors live in `vb-db`, credential errors in `vb-guard`. A unified
//! error is deferred to `vb-cli` where all crate errors converge through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any Vaultbook crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Caller-supplied fields failed a shape check. Never persisted.
    #[error("Validation error: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// A field name that the entity schema does not declare.
    #[error("Unknown field '{field}' for {kind} (expected one of: {expected})")]
    UnknownField {
        kind: String,
        field: String,
        expected: String,
    },
}

impl CoreError {
    /// Shorthand for a validation failure on one field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
