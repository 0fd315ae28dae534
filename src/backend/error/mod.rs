//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and the
//! conversions that turn every service-layer error into it.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status codes
//! └── conversion.rs - From impls and IntoResponse
//! ```
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return
//! `Result<_, BackendError>` and use `?` on any service call. The body is
//! always the `{"message": ...}` envelope.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;

use axum::Json;

use crate::shared::ApiMessage;

/// Handler result: the payload wrapped in the response envelope
pub type ApiResult<T> = Result<Json<ApiMessage<T>>, BackendError>;

/// Wrap a successful payload in `{"message": ...}`
pub fn reply<T>(message: T) -> ApiResult<T> {
    Ok(Json(ApiMessage::new(message)))
}
