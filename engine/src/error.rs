//! Error types for the Keyset engine.

use serde_json::Value;
use thiserror::Error;

/// All possible errors from the Keyset engine.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    // Validation errors
    #[error("Invalid request format. Expected an array of sets.")]
    NotAnArray { received: Value },

    #[error("Empty sets array provided")]
    EmptyBatch,

    #[error("Invalid set format. Each set must have id and order properties.")]
    InvalidEntry {
        index: usize,
        field: &'static str,
        received_value: Value,
        entry: Value,
    },

    #[error("Duplicate set id in batch: {id}")]
    DuplicateId { index: usize, id: String, entry: Value },

    #[error("Name and application are required fields")]
    MissingRequiredFields,

    // Lifecycle errors
    #[error("a reorder is already in flight")]
    ReorderInFlight,

    #[error("no reorder is in flight")]
    NotCommitting,
}

impl Error {
    /// The batch entry that caused a validation failure, if any.
    pub fn offending_entry(&self) -> Option<&Value> {
        match self {
            Error::InvalidEntry { entry, .. } | Error::DuplicateId { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Whether this error describes a malformed request rather than a local
    /// lifecycle violation.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Error::ReorderInFlight | Error::NotCommitting)
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
