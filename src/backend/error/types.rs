/**
 * Backend Error Types
 *
 * `BackendError` is the HTTP-facing error taxonomy. Every layer below
 * (stores, token service, auth orchestrator, user directory, catalog) has its
 * own error type; they are converted into one of these variants at the
 * handler boundary, which is the only place that knows about status codes.
 *
 * # Status Code Mapping
 *
 * - `Validation` - 400 Bad Request (malformed or out-of-range input)
 * - `Conflict` - 400 Bad Request (duplicate email)
 * - `Unauthorized` - 401 (missing/invalid/expired token, wrong owner)
 * - `NotFound` - 404
 * - `Unprocessable` - 422 (unprocessable update payloads)
 * - `Persistence` - 502 (the store call failed)
 * - `Internal` - 500
 */
use axum::http::StatusCode;
use thiserror::Error;

/// Backend-specific error types
///
/// Each variant carries the message written into the `{"message": ...}`
/// response body.
///
/// # Usage
///
/// ```rust
/// use emporium::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::not_found("product with id 42 not found");
/// assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Malformed or out-of-range input
    #[error("{0}")]
    Validation(String),

    /// Well-formed but unprocessable update payload
    #[error("{0}")]
    Unprocessable(String),

    /// Missing, malformed or expired token, or an ownership violation
    #[error("{0}")]
    Unauthorized(String),

    /// No matching document
    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key
    ///
    /// Surfaced as 400 rather than 409 to keep the existing client contract.
    #[error("{0}")]
    Conflict(String),

    /// A downstream store call failed
    #[error("{0}")]
    Persistence(String),

    /// Anything unexpected
    #[error("{0}")]
    Internal(String),
}

impl BackendError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(BackendError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            BackendError::Conflict("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::unprocessable("x").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(BackendError::unauthorized("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(BackendError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            BackendError::Persistence("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            BackendError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_message() {
        let error = BackendError::not_found("Test message");
        assert_eq!(error.message(), "Test message");
    }
}
