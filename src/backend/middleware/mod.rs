//! Middleware Module
//!
//! Request processing shared by the route handlers.
//!
//! - **`auth`** - `AuthUser` extractor that verifies the bearer token

/// Bearer-token authentication
pub mod auth;

pub use auth::{AuthUser, AuthenticatedUser};
