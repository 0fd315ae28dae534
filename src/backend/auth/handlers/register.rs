/**
 * Registration Handler
 *
 * POST /api/v1/auth/register
 *
 * # Registration Process
 *
 * 1. Validate the profile and the credentials
 * 2. Reject an email that already has an account
 * 3. Hash the password with bcrypt
 * 4. Create the profile, then the credentials record
 * 5. Return an access/refresh token pair
 */
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::backend::auth::service::AuthService;
use crate::backend::auth::tokens::TokenPair;
use crate::backend::error::{reply, ApiResult};
use crate::shared::models::UserDataWithCredentials;

/// Register a new account
///
/// # Errors
///
/// * `400 Bad Request` - malformed body, invalid field or email in use
/// * `502 Bad Gateway` - the store failed
///
/// # Example Request
///
/// ```http
/// POST /api/v1/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "user_data": { "first_name": "Ada", "last_name": "Lovelace", "age": 36 },
///   "credentials": { "email": "ada@example.com", "password": "analytical" }
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "message": {
///     "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
///     "refresh_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
///   }
/// }
/// ```
pub async fn register(
    State(auth): State<AuthService>,
    payload: Result<Json<UserDataWithCredentials>, JsonRejection>,
) -> ApiResult<TokenPair> {
    let Json(registration) = payload?;
    tracing::info!("Registration request for: {}", registration.credentials.email);

    let tokens = auth.register(registration).await?;
    reply(tokens)
}
