//! Document Stores
//!
//! One trait per document collection. Services hold them as `Arc<dyn _>` so
//! the same code runs over Postgres in production and over the in-memory store
//! in tests (or when no `DATABASE_URL` is configured).
//!
//! # Module Structure
//!
//! ```text
//! storage/
//! ├── mod.rs       - Store traits and the `Stores` bundle
//! ├── error.rs     - StoreError
//! ├── memory.rs    - MemoryStore (tokio RwLock over HashMaps)
//! └── postgres.rs  - PgStore (sqlx)
//! ```
//!
//! # Uniqueness
//!
//! Login emails and "one watchlist per user" are enforced by the store itself
//! and reported as [`StoreError::Duplicate`], so callers never rely on a
//! separate existence check.

pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::shared::models::{Credentials, Product, ProductObserver, User};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::PgStore;

/// User profile documents
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    async fn get_user(&self, id: Uuid) -> StoreResult<User>;
    /// Replace a stored profile; `NotFound` if the id is unknown
    async fn update_user(&self, user: User) -> StoreResult<User>;
    /// `NoMatch` if nothing was deleted
    async fn delete_user(&self, id: Uuid) -> StoreResult<()>;
}

/// Login records
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// `Duplicate` if the email is already registered
    async fn insert_credentials(&self, credentials: Credentials) -> StoreResult<Credentials>;
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credentials>>;
    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Option<Credentials>>;
    /// Replace email and hash; `NotFound` if the id is unknown
    async fn update_credentials(&self, credentials: Credentials) -> StoreResult<Credentials>;
    /// Returns the number of records removed
    async fn delete_credentials_of(&self, user_id: Uuid) -> StoreResult<u64>;
}

/// Product listings
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert_product(&self, product: Product) -> StoreResult<Product>;
    async fn get_product(&self, id: Uuid) -> StoreResult<Product>;
    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn list_products_of(&self, seller_id: Uuid) -> StoreResult<Vec<Product>>;
    async fn update_product(&self, product: Product) -> StoreResult<Product>;
    async fn delete_product(&self, id: Uuid) -> StoreResult<()>;

    /// Append picture URLs in place, leaving every other column as stored
    async fn append_images(&self, id: Uuid, urls: Vec<String>) -> StoreResult<Product>;

    /// Decrement `quantity` by `units` only if at least `units` are in stock
    ///
    /// Returns `false` when the product is missing or short on stock; the
    /// stored quantity is left untouched in that case.
    async fn reserve_stock(&self, id: Uuid, units: i32) -> StoreResult<bool>;

    /// Give back units taken by [`ProductStore::reserve_stock`]
    async fn release_stock(&self, id: Uuid, units: i32) -> StoreResult<()>;
}

/// Watchlists, at most one per user
#[async_trait]
pub trait ObserverStore: Send + Sync {
    async fn get_observer(&self, id: Uuid) -> StoreResult<ProductObserver>;
    async fn find_observer_of(&self, user_id: Uuid) -> StoreResult<Option<ProductObserver>>;
    /// `Duplicate` if the user already has a watchlist
    async fn insert_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver>;
    async fn update_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver>;
}

/// The four collections, shared by every service
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub credentials: Arc<dyn CredentialStore>,
    pub products: Arc<dyn ProductStore>,
    pub observers: Arc<dyn ObserverStore>,
}

impl Stores {
    /// Back every collection with one fresh [`MemoryStore`]
    pub fn in_memory() -> Self {
        Self::from_shared(Arc::new(MemoryStore::new()))
    }

    /// Back every collection with Postgres
    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self::from_shared(Arc::new(PgStore::new(pool)))
    }

    fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: UserStore + CredentialStore + ProductStore + ObserverStore + 'static,
    {
        Self {
            users: store.clone(),
            credentials: store.clone(),
            products: store.clone(),
            observers: store,
        }
    }
}
