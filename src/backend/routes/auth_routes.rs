/**
 * Authentication Routes
 *
 * - `POST /auth/register` - Account registration
 * - `POST /auth/login` - Credential login
 * - `PUT /auth/update` - Change email and password
 * - `GET /auth/refresh` - New access token
 * - `GET /auth/current` - The caller's profile
 */
use axum::{
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::handlers::{current_user, login, refresh, register, update_credentials};
use crate::backend::server::state::AppState;

pub fn configure_auth_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/update", put(update_credentials))
        .route("/auth/refresh", get(refresh))
        .route("/auth/current", get(current_user))
}
