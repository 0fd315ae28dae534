//! User Profiles
//!
//! The user directory owns profile records. Handlers expose lookup, update,
//! account deletion and the profile picture.

/// Profile records and their rules
pub mod directory;

/// HTTP handlers for `/user`
pub mod handlers;

pub use directory::{DirectoryError, UserDirectory};
