//! Backend Module
//!
//! This module contains all server-side code for the Emporium marketplace:
//! an Axum HTTP server exposing the JSON API under `/api/v1`, the services
//! behind it and the stores they persist to.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state and app creation
//! - **`routes`** - Route tables and router assembly
//! - **`auth`** - Token service, password hashing, auth orchestrator
//! - **`users`** - User directory and profile handlers
//! - **`products`** - Product catalog, purchase and watchlist
//! - **`storage`** - Store traits with Postgres and in-memory backends
//! - **`uploads`** - Picture files on local disk
//! - **`middleware`** - Request extractors
//! - **`error`** - `BackendError` and status mapping
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── users/          - User profiles
//! ├── products/       - Listings, purchase, watchlist
//! ├── storage/        - Persistence
//! ├── uploads.rs      - Stored pictures
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` is built once at start-up and holds the services. Each service
//! owns `Arc<dyn _>` handles to the stores it needs, so handlers share them
//! without locks of their own; the stores do their own synchronization.
//!
//! # Error Handling
//!
//! Services return their own `thiserror` enums. Handlers convert them into
//! `BackendError` with `?`, which picks the status code and writes the
//! `{"message": ...}` body.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and credentials
pub mod auth;

/// User profiles
pub mod users;

/// Product listings, purchase and watchlist
pub mod products;

/// Document stores
pub mod storage;

/// Uploaded picture files
pub mod uploads;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::create_app;
