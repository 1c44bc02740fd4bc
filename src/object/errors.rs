//! # Object Errors
//!
//! Every failure is a terminal validation outcome; none is retryable.
//! Each kind maps to a protocol ping code and an HTTP status so the API
//! layer can report it without inspecting messages.

use thiserror::Error;

use crate::permissions::PermissionError;
use crate::store::StoreError;

/// Result type for object construction
pub type ObjectResult<T> = Result<T, ObjectError>;

/// Errors that carry a protocol ping code
pub trait ProtocolError: std::error::Error {
    /// Ping `error_code` value
    fn error_code(&self) -> u16;

    /// HTTP status the API layer should answer with
    fn status_code(&self) -> u16;
}

/// Object construction and validation errors
#[derive(Debug, Clone, Error)]
pub enum ObjectError {
    // ==================
    // Type Tag Errors
    // ==================
    /// Input has no `object_type`
    #[error("Missing object_type")]
    MissingObjectType,

    /// `object_type` names no registered variant
    #[error("Unknown object type: {0}")]
    UnknownVariant(String),

    // ==================
    // Shape Errors
    // ==================
    /// Required field absent after defaults
    #[error("Missing required field: {0}")]
    MissingRequiredField(String),

    /// Value incompatible with the declared field type
    #[error("Field '{field}' must be {expected}, got {actual}")]
    FieldTypeMismatch {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Permission field outside the encodable range
    #[error("Invalid permission value in '{field}': {source}")]
    InvalidPermissionValue {
        field: String,
        #[source]
        source: PermissionError,
    },

    #[error("Invalid channel type: {0}")]
    InvalidChannelType(String),

    #[error("Invalid attachment type: {0}")]
    InvalidAttachmentType(String),

    // ==================
    // Patch Errors
    // ==================
    /// Patch changes a protected field
    #[error("Attempted to change non-rewritable field: {0}")]
    ImmutableFieldRewrite(String),

    /// Patch target does not exist
    #[error("Object with ID '{0}' not found")]
    TargetNotFound(String),

    // ==================
    // Integrity Errors
    // ==================
    /// Id field names a record that does not exist
    #[error("No object with ID '{id}' (given in '{field}') was found")]
    DanglingReference { field: String, id: String },

    /// Id field names a record of the wrong variant
    #[error("Object given in '{field}' has the wrong type (is {actual}, should be {expected})")]
    WrongReferenceType {
        field: String,
        expected: String,
        actual: String,
    },

    /// Another record of the variant already holds the value
    #[error("Value {value} for '{field}' is already taken")]
    UniqueConstraintViolation { field: String, value: String },

    // ==================
    // Collaborator Errors
    // ==================
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ObjectError {
    pub(crate) fn type_mismatch(
        field: impl Into<String>,
        expected: &'static str,
        actual: &'static str,
    ) -> Self {
        ObjectError::FieldTypeMismatch {
            field: field.into(),
            expected,
            actual,
        }
    }

    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ObjectError::MissingRequiredField(field.into())
    }
}

impl ProtocolError for ObjectError {
    fn error_code(&self) -> u16 {
        match self {
            ObjectError::Storage(_) => 1,
            ObjectError::TargetNotFound(_) => 4,
            ObjectError::MissingObjectType | ObjectError::UnknownVariant(_) => 5,
            ObjectError::ImmutableFieldRewrite(_) => 6,
            ObjectError::MissingRequiredField(_) => 7,
            ObjectError::DanglingReference { .. } => 9,
            ObjectError::WrongReferenceType { .. } => 10,
            ObjectError::UniqueConstraintViolation { .. } => 12,
            ObjectError::FieldTypeMismatch { .. }
            | ObjectError::InvalidPermissionValue { .. }
            | ObjectError::InvalidChannelType(_)
            | ObjectError::InvalidAttachmentType(_) => 13,
        }
    }

    fn status_code(&self) -> u16 {
        match self {
            ObjectError::Storage(_) => 500,
            ObjectError::TargetNotFound(_) | ObjectError::DanglingReference { .. } => 404,
            ObjectError::UniqueConstraintViolation { .. } => 409,
            _ => 400,
        }
    }
}
