/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * 1. Auth, user and product routes, nested under `/api/v1`
 * 2. JSON 404 fallback for every other path
 * 3. Layers: request body limit, CORS, request tracing
 */
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, http::Method, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::backend::error::BackendError;
use crate::backend::routes::{
    auth_routes::configure_auth_routes, product_routes::configure_product_routes,
    user_routes::configure_user_routes,
};
use crate::backend::server::state::AppState;

pub const API_PREFIX: &str = "/api/v1";

const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state holding the services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let max_upload_bytes = app_state.config.max_upload_bytes;

    let api = Router::new();
    let api = configure_auth_routes(api);
    let api = configure_user_routes(api);
    let api = configure_product_routes(api);

    Router::new()
        .nest(API_PREFIX, api)
        .fallback(|| async { BackendError::not_found("route not found") })
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Any origin and header; methods are the ones the API uses plus PATCH
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(CORS_MAX_AGE)
}
