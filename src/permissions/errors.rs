//! # Permission Errors

use thiserror::Error;

/// Result type for permission codec operations
pub type PermissionResult<T> = Result<T, PermissionError>;

/// Failures while turning raw input into a permission set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// Integer outside `0..=8191`
    #[error("permission value {0} is outside the range 0..=8191")]
    OutOfRange(i64),

    /// List element that is not a single flag
    #[error("permission list element {0} is not a single flag")]
    NotASingleFlag(i64),

    /// Name that is neither a scope nor a preset
    #[error("unknown permission name '{0}'")]
    UnknownName(String),

    /// Value of a JSON type that cannot encode permissions
    #[error("cannot read permissions from a {0} value")]
    Malformed(&'static str),
}
