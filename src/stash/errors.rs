//! # Stash Errors

use thiserror::Error;

use crate::object::ProtocolError;
use crate::store::StoreError;

/// Result type for stash requests
pub type StashResult<T> = Result<T, StashError>;

/// Stash request errors
#[derive(Debug, Clone, Error)]
pub enum StashError {
    /// More ids than the stash bound
    #[error("Too many objects requested: {count} (max: {limit})")]
    TooManyIds { count: usize, limit: usize },

    /// First requested id that is not stored
    #[error("ID does not exist: {0}")]
    MissingId(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ProtocolError for StashError {
    fn error_code(&self) -> u16 {
        match self {
            StashError::TooManyIds { .. } => 11,
            StashError::MissingId(_) => 9,
            StashError::Storage(_) => 1,
        }
    }

    fn status_code(&self) -> u16 {
        match self {
            StashError::TooManyIds { .. } => 400,
            StashError::MissingId(_) => 404,
            StashError::Storage(_) => 500,
        }
    }
}
