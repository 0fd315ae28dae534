//! Marketplace Data Model
//!
//! Documents stored by the backend. Identities are UUIDs; the nil UUID is the
//! "not assigned yet" sentinel, which is what a client sends when it wants the
//! server to create a document.

pub mod category;
pub mod observer;
pub mod product;
pub mod user;

pub use category::Category;
pub use observer::ProductObserver;
pub use product::Product;
pub use user::{Credentials, CredentialsInput, User, UserDataWithCredentials};

use crate::shared::error::SharedError;

/// Check that a trimmed string has between `min` and `max` characters
pub(crate) fn check_length(
    field: &str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), SharedError> {
    let len = value.trim().chars().count();
    if len < min || len > max {
        return Err(SharedError::validation(
            field,
            format!("must be between {min} and {max} characters"),
        ));
    }
    Ok(())
}

/// Parse an identifier received as text (path segment, query value)
pub fn parse_id(raw: &str) -> Result<uuid::Uuid, SharedError> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|_| SharedError::invalid_id(raw))
}
