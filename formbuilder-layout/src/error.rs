//! Error types for the layout model

use std::fmt;

use thiserror::Error;

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors that can occur in layout operations
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Malformed form document on load — collects every structural problem
    /// found, not just the first
    #[error("invalid form document: {}", errors.join("; "))]
    InvalidDocument { errors: Vec<String> },

    /// Field registry error (unknown field type on instantiation)
    #[error(transparent)]
    Fields(#[from] formbuilder_fields::FieldsError),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    pub fn invalid_document(errors: Vec<String>) -> Self {
        Self::InvalidDocument { errors }
    }
}

/// A refused structural mutation.
///
/// Refusal is an expected outcome, not an error: attempting to delete the
/// last remaining row or column leaves the layout untouched and hands the
/// caller a human-readable reason to surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refused {
    pub reason: String,
}

impl Refused {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}
