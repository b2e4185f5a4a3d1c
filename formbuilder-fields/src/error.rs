//! Error types for the field type registry

use thiserror::Error;

/// Result type for field registry operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur in field registry operations
#[derive(Debug, Error)]
pub enum FieldsError {
    /// Field type key is not present in the registry
    #[error("unknown field type: {key}")]
    UnknownType { key: String },
}

impl FieldsError {
    /// Shorthand for the registry-miss error.
    pub fn unknown_type(key: impl Into<String>) -> Self {
        Self::UnknownType { key: key.into() }
    }
}
