/**
 * Login Handler
 *
 * POST /api/v1/auth/login
 *
 * An unknown email answers 404 and a wrong password 401. Passwords are
 * compared by bcrypt and never logged.
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::auth::service::AuthService;
use crate::backend::auth::tokens::TokenPair;
use crate::backend::error::{reply, ApiResult};
use crate::shared::models::CredentialsInput;

/// Exchange credentials for a token pair
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "password": "analytical" }
/// ```
pub async fn login(
    State(auth): State<AuthService>,
    payload: Result<Json<CredentialsInput>, JsonRejection>,
) -> ApiResult<TokenPair> {
    let Json(input) = payload?;
    tracing::info!("Login request for: {}", input.email);

    let tokens = auth.login(input).await?;
    reply(tokens)
}
