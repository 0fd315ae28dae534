//! Shared Error Types
//!
//! Errors produced while checking a document against the marketplace rules
//! (name lengths, age range, price bounds and so on). They carry the offending
//! field so the HTTP layer can return a precise message.
//!
//! # Usage
//!
//! ```rust
//! use emporium::shared::error::SharedError;
//!
//! let error = SharedError::validation("age", "must be between 13 and 100");
//! assert!(error.to_string().contains("age"));
//! ```
use thiserror::Error;

/// Validation failures for shared models
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// A field is missing, too long, too short or out of range
    #[error("invalid field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// An identifier could not be parsed
    #[error("invalid identifier '{value}'")]
    InvalidId {
        /// The raw value that was supplied
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new invalid identifier error
    pub fn invalid_id(value: impl Into<String>) -> Self {
        Self::InvalidId {
            value: value.into(),
        }
    }
}
