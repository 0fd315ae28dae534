/**
 * User Directory
 *
 * CRUD over user profiles with timestamping on create and update. Deleting a
 * profile does not touch credentials or products; the auth orchestrator
 * removes the credentials itself when an account is closed.
 */
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::ownership::{ensure_owner, NotOwner};
use crate::backend::storage::{StoreError, StoreResult, UserStore};
use crate::shared::models::User;
use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    NotOwner(#[from] NotOwner),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub struct UserDirectory {
    users: Arc<dyn UserStore>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Store a new profile under a fresh identity
    pub async fn create_user(&self, mut user: User) -> StoreResult<User> {
        let now = Utc::now();
        user.id = Uuid::new_v4();
        user.created_at = now;
        user.updated_at = now;
        self.users.insert_user(user).await
    }

    pub async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users.get_user(id).await
    }

    /// Replace the caller's own profile
    ///
    /// Identity, creation time, credit balance and picture are kept from the
    /// stored profile; an empty contact email keeps the stored one.
    pub async fn update_user(&self, subject: Uuid, update: User) -> Result<User, DirectoryError> {
        if !update.id.is_nil() {
            ensure_owner(subject, update.id, "profile", "update")?;
        }
        update.validate()?;

        let current = self.users.get_user(subject).await?;
        let contact_email = if update.contact_email.trim().is_empty() {
            current.contact_email
        } else {
            update.contact_email
        };

        let user = User {
            id: current.id,
            first_name: update.first_name,
            last_name: update.last_name,
            age: update.age,
            contact_email,
            phone_number: update.phone_number,
            bio: update.bio,
            profile_picture: current.profile_picture,
            credits: current.credits,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let user = self.users.update_user(user).await?;
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Record the URL of a freshly uploaded profile picture
    pub async fn set_profile_picture(&self, subject: Uuid, url: String) -> StoreResult<User> {
        let mut user = self.users.get_user(subject).await?;
        user.profile_picture = Some(url);
        user.updated_at = Utc::now();
        self.users.update_user(user).await
    }

    pub async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        self.users.delete_user(id).await
    }
}
