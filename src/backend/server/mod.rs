//! Server Module
//!
//! Start-up code: configuration, application state and app creation.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and database loading
//! └── init.rs         - App creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env`
//! 2. **Store Selection**: Postgres when `DATABASE_URL` is set, in-memory otherwise
//! 3. **State Creation**: services wired into `AppState`
//! 4. **Router Creation**: routes, CORS, tracing and body limits
//!
//! # Example
//!
//! ```rust,no_run
//! use emporium::backend::server::{config::ServerConfig, create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::{create_app, create_app_with_stores};
pub use state::AppState;
