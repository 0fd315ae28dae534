/**
 * Token Service
 *
 * Issues and verifies HS256-signed JWTs. Access tokens carry a snapshot of
 * the user; refresh tokens carry only the subject. Both are verified the same
 * way, and the subject is what every ownership check trusts.
 *
 * # Lifetimes
 *
 * - Access token: `ACCESS_TOKEN_TTL_SECS` (1 hour by default)
 * - Refresh token: `REFRESH_TOKEN_TTL_SECS` (48 hours by default)
 */
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::models::User;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// User ID the token was issued to
    pub sub: Uuid,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Profile snapshot, only present on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}

/// Access and refresh token returned by register and login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("missing authorization token")]
    MissingToken,

    #[error("authorization header must have the form 'Bearer <token>'")]
    InvalidFormat,

    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    ParseError(String),

    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies tokens with one process-wide secret
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Short-lived token carrying the subject and a profile snapshot
    pub fn issue_access_token(&self, user: &User) -> Result<String, TokenError> {
        self.sign(user.id, self.access_ttl, Some(user.clone()))
    }

    /// Long-lived token carrying only the subject
    pub fn issue_refresh_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.sign(user_id, self.refresh_ttl, None)
    }

    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access_token: self.issue_access_token(user)?,
            refresh_token: self.issue_refresh_token(user.id)?,
        })
    }

    /// Verify the value of an `Authorization` header
    ///
    /// # Errors
    ///
    /// * `InvalidFormat` - the value does not start with `Bearer `
    /// * `Expired` - the signature is valid but `exp` has passed
    /// * `ParseError` - bad signature, structure or claims
    pub fn verify(&self, header_value: &str) -> Result<Claims, TokenError> {
        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(TokenError::InvalidFormat)?;
        self.decode(token)
    }

    /// Verify a raw token (no `Bearer ` prefix)
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::ParseError(e.to_string()),
            })
    }

    fn sign(&self, sub: Uuid, ttl: Duration, user: Option<User>) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub,
            iat: now,
            exp: now.saturating_add(ttl_secs),
            user,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    #[cfg(test)]
    pub(crate) fn sign_with_expiry(&self, sub: Uuid, iat: i64, exp: i64) -> String {
        let claims = Claims {
            sub,
            iat,
            exp,
            user: None,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .expect("test token signs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn service() -> TokenService {
        TokenService::new(
            b"test-secret",
            Duration::from_secs(3600),
            Duration::from_secs(48 * 3600),
        )
    }

    fn user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "first_name": "Grace",
            "last_name": "Hopper",
            "age": 40,
        }))
        .unwrap()
    }

    #[test]
    fn test_access_token_round_trip() {
        let tokens = service();
        let user = user();
        let token = tokens.issue_access_token(&user).unwrap();

        let claims = tokens.verify(&format!("Bearer {token}")).unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.user.map(|u| u.first_name), Some("Grace".to_string()));
    }

    #[test]
    fn test_refresh_token_has_no_profile() {
        let tokens = service();
        let id = Uuid::new_v4();
        let claims = tokens.decode(&tokens.issue_refresh_token(id).unwrap()).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.user.is_none());
        assert_eq!(claims.exp - claims.iat, 48 * 3600);
    }

    #[test]
    fn test_missing_bearer_prefix() {
        let tokens = service();
        let token = tokens.issue_refresh_token(Uuid::new_v4()).unwrap();
        assert_matches!(tokens.verify(&token), Err(TokenError::InvalidFormat));
        assert_matches!(tokens.verify("Bearer "), Err(TokenError::InvalidFormat));
    }

    #[test]
    fn test_expired_token() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let token = tokens.sign_with_expiry(Uuid::new_v4(), now - 7200, now - 3600);
        assert_matches!(tokens.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue_refresh_token(Uuid::new_v4()).unwrap();
        let other = TokenService::new(b"other", Duration::from_secs(1), Duration::from_secs(1));
        assert_matches!(other.decode(&token), Err(TokenError::ParseError(_)));
    }

    #[test]
    fn test_garbage_token() {
        assert_matches!(
            service().verify("Bearer invalid.token.here"),
            Err(TokenError::ParseError(_))
        );
    }
}
