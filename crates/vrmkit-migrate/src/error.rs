//! Error types for the migration engine.

use std::path::PathBuf;

use thiserror::Error;
use vrmkit_schema::StoreError;

/// Result type for migration passes.
pub type MigrationResult<T> = Result<T, MigrationError>;

/// Failures that abort a migration pass.
///
/// Malformed legacy data never produces one of these; it is skipped and
/// recorded in the [`MigrationReport`](crate::report::MigrationReport).
#[derive(Debug, Error)]
pub enum MigrationError {
    /// The entity store faulted while being queried.
    #[error("migration aborted: {0}")]
    Store(#[from] StoreError),

    /// Another rig earlier in the scene has the same name, so store queries
    /// cannot tell the two apart.
    #[error("rig name '{0}' is not unique in the scene")]
    DuplicateRig(String),
}

/// Errors that can occur while loading or saving a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Failed to read the scene file.
    #[error("Failed to read scene from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the scene file.
    #[error("Failed to write scene to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scene JSON could not be (de)serialized.
    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Two rigs share a name.
    #[error("Duplicate rig name '{0}' in scene")]
    DuplicateRig(String),
}
