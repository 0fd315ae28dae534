/**
 * User Profiles and Credentials
 *
 * A user is two documents: the public profile (`User`) and the login record
 * (`Credentials`) that points back at it through `user_id`. Registration
 * carries both in one body (`UserDataWithCredentials`).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::models::check_length;

pub const NAME_MIN_LEN: usize = 1;
pub const NAME_MAX_LEN: usize = 50;
pub const AGE_MIN: i32 = 13;
pub const AGE_MAX: i32 = 100;
pub const BIO_MAX_LEN: usize = 500;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 64;

/// Public user profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user ID (nil until stored)
    #[serde(default)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    /// Contact address shown to other users, defaults to the login email
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// URL of the uploaded profile picture
    #[serde(default)]
    pub profile_picture: Option<String>,
    /// Credit balance (not debited by purchases yet)
    #[serde(default)]
    pub credits: f64,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check names, age, contact email and bio against the profile rules
    pub fn validate(&self) -> Result<(), SharedError> {
        check_length("first_name", &self.first_name, NAME_MIN_LEN, NAME_MAX_LEN)?;
        check_length("last_name", &self.last_name, NAME_MIN_LEN, NAME_MAX_LEN)?;

        if !(AGE_MIN..=AGE_MAX).contains(&self.age) {
            return Err(SharedError::validation(
                "age",
                format!("must be between {AGE_MIN} and {AGE_MAX}"),
            ));
        }

        if !self.contact_email.is_empty() && !is_plausible_email(&self.contact_email) {
            return Err(SharedError::validation("contact_email", "invalid email format"));
        }

        if let Some(bio) = &self.bio {
            if bio.chars().count() > BIO_MAX_LEN {
                return Err(SharedError::validation(
                    "bio",
                    format!("must be at most {BIO_MAX_LEN} characters"),
                ));
            }
        }

        Ok(())
    }
}

/// Stored login record
///
/// Never serialized to clients; `password_hash` is a bcrypt hash.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub id: Uuid,
    /// Owning user profile
    pub user_id: Uuid,
    /// Login email, unique across the store
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Email and plaintext password as submitted by a client
#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsInput {
    pub email: String,
    pub password: String,
}

impl CredentialsInput {
    pub fn validate(&self) -> Result<(), SharedError> {
        if !is_plausible_email(&self.email) {
            return Err(SharedError::validation("email", "invalid email format"));
        }
        let len = self.password.chars().count();
        if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
            return Err(SharedError::validation(
                "password",
                format!("must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"),
            ));
        }
        Ok(())
    }
}

// Keeps plaintext passwords out of logs.
impl std::fmt::Debug for CredentialsInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsInput")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration body: profile plus login credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataWithCredentials {
    pub user_data: User,
    pub credentials: CredentialsInput,
}

impl UserDataWithCredentials {
    pub fn validate(&self) -> Result<(), SharedError> {
        self.credentials.validate()?;
        self.user_data.validate()
    }
}

/// Basic shape check: one '@' with something on both sides
fn is_plausible_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
