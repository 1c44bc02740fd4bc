//! # Store Errors

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage collaborator failures
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Insert of an id that is already stored
    #[error("Object with ID '{0}' already exists")]
    IdTaken(String),

    /// Replace of an id that is not stored
    #[error("Object with ID '{0}' not found")]
    NotFound(String),

    /// Internal lock was poisoned by a panicking writer
    #[error("Storage lock poisoned")]
    LockPoisoned,

    /// Snapshot file could not be read or written
    #[error("Snapshot error: {0}")]
    Snapshot(String),
}
