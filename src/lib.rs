//! Emporium - Marketplace Backend Library
//!
//! Emporium is a REST backend for a small marketplace. It manages user
//! accounts, credential-based authentication and product listings, including
//! image upload, purchasing and a per-user product watchlist.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types that do not depend on the server stack
//!   - User, credential, product and watchlist models
//!   - Field validation rules and their error type
//!   - The `{"message": ...}` response envelope
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server, routing and request extraction
//!   - Token service, auth orchestrator, user directory, product catalog
//!   - Postgres and in-memory document stores
//!
//! # Feature Flags
//!
//! - **`ssr`** - Server-side code (enabled by default)
//!   - Includes Axum, sqlx, bcrypt and jsonwebtoken
//!   - Required for server builds
//!
//! # Usage
//!
//! ```rust,no_run
//! use emporium::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for model validation
//! - `backend::storage::StoreError`, `backend::auth::AuthError` and
//!   `backend::products::CatalogError` inside the service layer
//! - `backend::BackendError` at the HTTP boundary, the only place that knows
//!   about status codes

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
