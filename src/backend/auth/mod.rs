//! Authentication Module
//!
//! Issues and verifies tokens, hashes passwords and orchestrates the
//! account flows that touch both credentials and user profiles.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── tokens.rs       - Token service (HS256 access and refresh tokens)
//! ├── passwords.rs    - bcrypt hashing
//! ├── ownership.rs    - Owner checks shared by every mutating operation
//! ├── service.rs      - Auth orchestrator
//! ├── error.rs        - AuthError
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: profile and credentials created → token pair returned
//! 2. **Login**: credentials verified → token pair returned
//! 3. **Refresh**: valid token → new access token with a fresh user snapshot
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt and never serialized
//! - Access tokens expire after one hour, refresh tokens after 48 hours
//!   by default
//! - Expired tokens are rejected with no leeway

/// Token issuing and verification
pub mod tokens;

/// Password hashing
pub mod passwords;

/// Ownership checks
pub mod ownership;

/// Auth orchestrator
pub mod service;

/// Auth error type
pub mod error;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use error::AuthError;
pub use ownership::{ensure_owner, NotOwner};
pub use passwords::PasswordHasher;
pub use service::AuthService;
pub use tokens::{Claims, TokenError, TokenPair, TokenService};
