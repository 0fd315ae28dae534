/**
 * Account Handlers
 *
 * Endpoints for the signed-in caller. The caller is always the token
 * subject; none of these take a user id from the request.
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::auth::service::AuthService;
use crate::backend::error::{reply, ApiResult};
use crate::backend::middleware::AuthUser;
use crate::shared::models::{CredentialsInput, User};

/// PUT /api/v1/auth/update
///
/// Replace the caller's login email and password.
pub async fn update_credentials(
    State(auth): State<AuthService>,
    user: AuthUser,
    payload: Result<Json<CredentialsInput>, JsonRejection>,
) -> ApiResult<&'static str> {
    let Json(input) = payload?;
    auth.update_credentials(user.id(), input).await?;
    reply("Successfully updated")
}

/// GET /api/v1/auth/refresh
///
/// Issue a new access token carrying a fresh snapshot of the profile.
pub async fn refresh(State(auth): State<AuthService>, user: AuthUser) -> ApiResult<String> {
    let token = auth.refresh_access_token(user.id()).await?;
    tracing::debug!(user_id = %user.id(), "Access token refreshed");
    reply(token)
}

/// GET /api/v1/auth/current
pub async fn current_user(State(auth): State<AuthService>, user: AuthUser) -> ApiResult<User> {
    reply(auth.current_user(user.id()).await?)
}
