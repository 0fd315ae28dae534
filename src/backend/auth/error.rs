use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::tokens::TokenError;
use crate::backend::storage::StoreError;
use crate::shared::SharedError;

/// Failures of the auth orchestrator
#[derive(Debug, Error)]
pub enum AuthError {
    /// Another account already uses this login email
    #[error("user with email {0} already exists")]
    EmailInUse(String),

    /// Login with an email nobody registered
    #[error("no account found for this email")]
    NoAccount,

    #[error("invalid password")]
    InvalidPassword,

    /// The caller has no credentials record to update
    #[error("no credentials found for user {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error("failed to hash password")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
