//! Authentication Handlers Module
//!
//! HTTP handlers for `/api/v1/auth`.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs       - Module exports and documentation
//! ├── register.rs  - Account registration
//! ├── login.rs     - Credential login
//! └── account.rs   - Credential update, token refresh, current user
//! ```
//!
//! # Handlers
//!
//! - **`register`** - POST /auth/register - create profile and credentials
//! - **`login`** - POST /auth/login - exchange credentials for tokens
//! - **`update_credentials`** - PUT /auth/update - change email and password
//! - **`refresh`** - GET /auth/refresh - new access token
//! - **`current_user`** - GET /auth/current - the caller's profile

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Handlers for the signed-in account
pub mod account;

pub use account::{current_user, refresh, update_credentials};
pub use login::login;
pub use register::register;
