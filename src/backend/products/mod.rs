//! Product Catalog Module
//!
//! Listings, picture attachment, purchase and the per-user watchlist.
//!
//! # Module Structure
//!
//! ```text
//! products/
//! ├── mod.rs          - Module exports and documentation
//! ├── catalog.rs      - Listing CRUD and the watchlist
//! ├── purchase.rs     - Cart checkout with stock reservation
//! ├── filter.rs       - Query filters for listing search
//! ├── error.rs        - CatalogError
//! └── handlers.rs     - HTTP handlers for `/product`
//! ```
//!
//! # Purchase
//!
//! A cart is validated in full before any stock moves. Stock is then taken
//! with conditional decrements in product-id order; if any decrement fails
//! the ones already taken are released and nothing is persisted.

/// Listing CRUD and watchlist
pub mod catalog;

/// Catalog error type
pub mod error;

/// Listing search filters
pub mod filter;

/// Cart checkout
pub mod purchase;

/// HTTP handlers
pub mod handlers;

pub use catalog::ProductCatalog;
pub use error::CatalogError;
pub use filter::{ProductFilter, ProductQuery};
pub use purchase::{Cart, PurchaseLine, PurchaseReceipt};
