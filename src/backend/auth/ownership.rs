//! Ownership check shared by every mutating operation.
//!
//! The subject of a verified token is the caller's identity. A document may
//! only be changed by the user it belongs to.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("you are not allowed to {action} this {resource}")]
pub struct NotOwner {
    pub actor: Uuid,
    pub resource: &'static str,
    pub action: &'static str,
}

/// Succeeds only when `actor` is `owner`
pub fn ensure_owner(
    actor: Uuid,
    owner: Uuid,
    resource: &'static str,
    action: &'static str,
) -> Result<(), NotOwner> {
    if actor == owner {
        return Ok(());
    }
    tracing::warn!(%actor, %owner, resource, action, "ownership check failed");
    Err(NotOwner {
        actor,
        resource,
        action,
    })
}
