//! Error types for the normalized schema and the entity-store seam.

use thiserror::Error;

/// Result type for entity-store queries.
pub type StoreResult<T> = Result<T, StoreError>;

/// Faults raised by an entity store.
///
/// These are the only failures that escape a migration pass. Malformed legacy
/// data is never reported through this type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store cannot be queried at all.
    #[error("entity store unavailable: {0}")]
    Unavailable(String),

    /// The rig named in a query does not exist in the store.
    #[error("rig '{0}' not found in entity store")]
    RigNotFound(String),
}

impl StoreError {
    /// Creates a new unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// Top-level error type for schema operations.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A version string could not be parsed.
    #[error("invalid add-on version '{0}' (expected MAJOR.MINOR.PATCH)")]
    InvalidVersion(String),

    /// An enum name outside its closed set.
    #[error("unknown {kind} '{value}'")]
    UnknownName {
        /// Which closed set was queried (e.g. "human bone").
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl SchemaError {
    pub(crate) fn unknown_name(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownName {
            kind,
            value: value.into(),
        }
    }
}
