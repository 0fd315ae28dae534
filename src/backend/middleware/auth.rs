/**
 * Authentication Extractor
 *
 * Reads the `Authorization: Bearer <token>` header, verifies it with the
 * token service and hands the caller's identity to the handler. The token
 * subject is trusted as the caller for every ownership check that follows.
 *
 * Rejections are `BackendError::Unauthorized`, so they carry the usual
 * `{"message": ...}` body.
 */
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

use crate::backend::auth::tokens::{Claims, TokenError, TokenService};
use crate::backend::error::BackendError;

/// Authenticated user data extracted from the token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

/// Axum extractor for the authenticated caller
///
/// ```rust,ignore
/// async fn handler(AuthUser(user): AuthUser) -> String {
///     user.user_id.to_string()
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.user_id
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    TokenService: FromRef<S>,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts.headers.get(AUTHORIZATION).ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            TokenError::MissingToken
        })?;

        let value = header.to_str().map_err(|_| {
            tracing::warn!("Authorization header is not valid ASCII");
            TokenError::InvalidFormat
        })?;

        let claims = TokenService::from_ref(state).verify(value).map_err(|e| {
            tracing::warn!("Rejected token: {}", e);
            e
        })?;

        Ok(AuthUser(AuthenticatedUser {
            user_id: claims.sub,
            claims,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};
    use std::time::Duration;

    fn tokens() -> TokenService {
        TokenService::new(b"secret", Duration::from_secs(60), Duration::from_secs(120))
    }

    async fn extract(header: Option<&str>) -> Result<AuthUser, BackendError> {
        let mut builder = Request::builder().uri("/api/v1/auth/current");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        AuthUser::from_request_parts(&mut parts, &tokens()).await
    }

    #[tokio::test]
    async fn test_valid_bearer_token() {
        let id = Uuid::new_v4();
        let token = tokens().issue_refresh_token(id).unwrap();
        let user = extract(Some(&format!("Bearer {token}"))).await.unwrap();
        assert_eq!(user.id(), id);
    }

    #[tokio::test]
    async fn test_missing_header() {
        let err = extract(None).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.message(), "missing authorization token");
    }

    #[tokio::test]
    async fn test_wrong_scheme() {
        let token = tokens().issue_refresh_token(Uuid::new_v4()).unwrap();
        let err = extract(Some(&format!("Token {token}"))).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_tampered_token() {
        let err = extract(Some("Bearer abc.def.ghi")).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }
}
