/**
 * Auth Orchestrator
 *
 * Composes the credential store, the token service and the user directory
 * into the account flows: register, login, credential update, token refresh,
 * current user and account deletion.
 *
 * # Registration
 *
 * 1. Validate profile and credentials
 * 2. Reject an email that is already registered
 * 3. Hash the password
 * 4. Create the profile (contact email defaults to the login email)
 * 5. Store the credentials; on failure delete the profile again
 * 6. Return a fresh access + refresh token pair
 *
 * The store enforces email uniqueness on insert, so two concurrent
 * registrations with the same email cannot both succeed.
 */
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::error::AuthError;
use crate::backend::auth::passwords::PasswordHasher;
use crate::backend::auth::tokens::{TokenPair, TokenService};
use crate::backend::storage::{CredentialStore, StoreError};
use crate::backend::users::UserDirectory;
use crate::shared::models::{Credentials, CredentialsInput, User, UserDataWithCredentials};

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<dyn CredentialStore>,
    users: UserDirectory,
    tokens: TokenService,
    hasher: PasswordHasher,
}

impl AuthService {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        users: UserDirectory,
        tokens: TokenService,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            credentials,
            users,
            tokens,
            hasher,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub async fn register(&self, registration: UserDataWithCredentials) -> Result<TokenPair, AuthError> {
        registration.validate()?;
        let UserDataWithCredentials {
            user_data,
            credentials,
        } = registration;
        let email = credentials.email.trim().to_string();

        if self.credentials.find_by_email(&email).await?.is_some() {
            tracing::warn!("Registration rejected, email already in use: {}", email);
            return Err(AuthError::EmailInUse(email));
        }

        let password_hash = self.hasher.hash(&credentials.password)?;

        let mut profile = user_data;
        if profile.contact_email.trim().is_empty() {
            profile.contact_email = email.clone();
        }
        profile.credits = 0.0;
        profile.profile_picture = None;
        let user = self.users.create_user(profile).await?;

        let now = Utc::now();
        let record = Credentials {
            id: Uuid::new_v4(),
            user_id: user.id,
            email: email.clone(),
            password_hash,
            created_at: now,
            updated_at: now,
        };

        if let Err(err) = self.credentials.insert_credentials(record).await {
            tracing::error!("Failed to store credentials for {}: {}", email, err);
            if let Err(cleanup) = self.users.delete_user(user.id).await {
                tracing::error!(user_id = %user.id, "Failed to remove orphaned profile: {}", cleanup);
            }
            return Err(match err {
                StoreError::Duplicate { .. } => AuthError::EmailInUse(email),
                other => AuthError::Store(other),
            });
        }

        tracing::info!(user_id = %user.id, "User registered: {}", email);
        Ok(self.tokens.issue_pair(&user)?)
    }

    pub async fn login(&self, input: CredentialsInput) -> Result<TokenPair, AuthError> {
        let email = input.email.trim();
        let record = self.credentials.find_by_email(email).await?.ok_or_else(|| {
            tracing::warn!("Login failed, no account: {}", email);
            AuthError::NoAccount
        })?;

        if !self.hasher.verify(&input.password, &record.password_hash)? {
            tracing::warn!("Login failed, invalid password: {}", email);
            return Err(AuthError::InvalidPassword);
        }

        let user = self.users.get_user(record.user_id).await?;
        tracing::info!(user_id = %user.id, "User logged in: {}", email);
        Ok(self.tokens.issue_pair(&user)?)
    }

    /// Replace the caller's login email and password
    ///
    /// The password is re-hashed unconditionally.
    pub async fn update_credentials(&self, subject: Uuid, input: CredentialsInput) -> Result<(), AuthError> {
        input.validate()?;

        let mut record = self
            .credentials
            .find_by_user(subject)
            .await?
            .ok_or(AuthError::NotFound(subject))?;

        record.email = input.email.trim().to_string();
        record.password_hash = self.hasher.hash(&input.password)?;
        record.updated_at = Utc::now();

        match self.credentials.update_credentials(record).await {
            Ok(_) => {
                tracing::info!(user_id = %subject, "Credentials updated");
                Ok(())
            }
            Err(StoreError::Duplicate { value, .. }) => Err(AuthError::EmailInUse(value)),
            Err(StoreError::NotFound { .. }) => Err(AuthError::NotFound(subject)),
            Err(err) => Err(err.into()),
        }
    }

    /// Mint a new access token from the current state of the subject's profile
    pub async fn refresh_access_token(&self, subject: Uuid) -> Result<String, AuthError> {
        let user = self.users.get_user(subject).await?;
        Ok(self.tokens.issue_access_token(&user)?)
    }

    pub async fn current_user(&self, subject: Uuid) -> Result<User, AuthError> {
        Ok(self.users.get_user(subject).await?)
    }

    /// Delete the subject's profile, then their credentials
    ///
    /// Products listed by the user are left in place.
    pub async fn delete_account(&self, subject: Uuid) -> Result<(), AuthError> {
        self.users.delete_user(subject).await?;
        let removed = self.credentials.delete_credentials_of(subject).await?;
        tracing::info!(user_id = %subject, credentials = removed, "Account deleted");
        Ok(())
    }
}
