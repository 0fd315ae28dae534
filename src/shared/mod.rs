//! Shared Module
//!
//! This module contains the marketplace data model and the rules that decide
//! whether a document is well formed. Nothing here touches the network or the
//! database, so the same types are used by handlers, services and stores.

/// Response envelope
pub mod message;

/// Validation error type
pub mod error;

/// Users, credentials, products and watchlists
pub mod models;

pub use error::SharedError;
pub use message::ApiMessage;
pub use models::{
    Category, Credentials, Product, ProductObserver, User, UserDataWithCredentials,
};
