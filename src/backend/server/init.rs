/**
 * Server Initialization
 *
 * Builds the application context and the router:
 *
 * 1. Open the database if `DATABASE_URL` is set, otherwise use the
 *    in-memory store
 * 2. Wire the services into `AppState`
 * 3. Create the router with all routes and middleware
 */
use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, ConfigError, ServerConfig};
use crate::backend::server::state::AppState;
use crate::backend::storage::Stores;

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails if a configured database cannot be reached.
pub async fn create_app(config: ServerConfig) -> Result<Router<()>, ConfigError> {
    tracing::info!("Initializing Emporium backend server");

    let stores = match load_database(&config).await? {
        Some(pool) => Stores::postgres(pool),
        None => Stores::in_memory(),
    };

    Ok(create_app_with_stores(config, stores))
}

/// Build the router over explicit stores (used by tests)
pub fn create_app_with_stores(config: ServerConfig, stores: Stores) -> Router<()> {
    let app_state = AppState::new(config, stores);
    let app = create_router(app_state);
    tracing::info!("Router configured");
    app
}
