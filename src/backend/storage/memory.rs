use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    CredentialStore, ObserverStore, ProductStore, StoreError, StoreResult, UserStore,
};
use crate::shared::models::{Credentials, Product, ProductObserver, User};

/// In-memory document store.
///
/// Used by tests and as the fallback when no database is configured. Each
/// collection sits behind its own lock; checks that must be atomic with a
/// write (email uniqueness, stock reservation) run under the write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    credentials: RwLock<HashMap<Uuid, Credentials>>,
    products: RwLock<HashMap<Uuid, Product>>,
    observers: RwLock<HashMap<Uuid, ProductObserver>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::InsertFailure { collection: "user" });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("user", id))
    }

    async fn update_user(&self, user: User) -> StoreResult<User> {
        let mut users = self.users.write().await;
        match users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(StoreError::not_found("user", user.id)),
        }
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<()> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NoMatch { collection: "user" }),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert_credentials(&self, credentials: Credentials) -> StoreResult<Credentials> {
        let mut all = self.credentials.write().await;
        if all.values().any(|c| c.email == credentials.email) {
            return Err(StoreError::duplicate("email", credentials.email));
        }
        all.insert(credentials.id, credentials.clone());
        Ok(credentials)
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<Credentials>> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn find_by_user(&self, user_id: Uuid) -> StoreResult<Option<Credentials>> {
        Ok(self
            .credentials
            .read()
            .await
            .values()
            .find(|c| c.user_id == user_id)
            .cloned())
    }

    async fn update_credentials(&self, credentials: Credentials) -> StoreResult<Credentials> {
        let mut all = self.credentials.write().await;
        if all
            .values()
            .any(|c| c.id != credentials.id && c.email == credentials.email)
        {
            return Err(StoreError::duplicate("email", credentials.email));
        }
        match all.get_mut(&credentials.id) {
            Some(slot) => {
                *slot = credentials.clone();
                Ok(credentials)
            }
            None => Err(StoreError::not_found("credentials", credentials.id)),
        }
    }

    async fn delete_credentials_of(&self, user_id: Uuid) -> StoreResult<u64> {
        let mut all = self.credentials.write().await;
        let before = all.len();
        all.retain(|_, c| c.user_id != user_id);
        Ok((before - all.len()) as u64)
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn insert_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(StoreError::InsertFailure {
                collection: "product",
            });
        }
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: Uuid) -> StoreResult<Product> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("product", id))
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.products.read().await.values().cloned().collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn list_products_of(&self, seller_id: Uuid) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self
            .products
            .read()
            .await
            .values()
            .filter(|p| p.seller_id == seller_id)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.created_at);
        Ok(products)
    }

    async fn update_product(&self, product: Product) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        match products.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(product)
            }
            None => Err(StoreError::not_found("product", product.id)),
        }
    }

    async fn delete_product(&self, id: Uuid) -> StoreResult<()> {
        match self.products.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NoMatch {
                collection: "product",
            }),
        }
    }

    async fn append_images(&self, id: Uuid, urls: Vec<String>) -> StoreResult<Product> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        product.images.extend(urls);
        product.updated_at = chrono::Utc::now();
        Ok(product.clone())
    }

    async fn reserve_stock(&self, id: Uuid, units: i32) -> StoreResult<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) if product.quantity >= units => {
                product.quantity -= units;
                product.updated_at = chrono::Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_stock(&self, id: Uuid, units: i32) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let product = products
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("product", id))?;
        product.quantity += units;
        product.updated_at = chrono::Utc::now();
        Ok(())
    }
}

#[async_trait]
impl ObserverStore for MemoryStore {
    async fn get_observer(&self, id: Uuid) -> StoreResult<ProductObserver> {
        self.observers
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("product observer", id))
    }

    async fn find_observer_of(&self, user_id: Uuid) -> StoreResult<Option<ProductObserver>> {
        Ok(self
            .observers
            .read()
            .await
            .values()
            .find(|o| o.user_id == user_id)
            .cloned())
    }

    async fn insert_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver> {
        let mut observers = self.observers.write().await;
        if observers.values().any(|o| o.user_id == observer.user_id) {
            return Err(StoreError::duplicate("user_id", observer.user_id.to_string()));
        }
        observers.insert(observer.id, observer.clone());
        Ok(observer)
    }

    async fn update_observer(&self, observer: ProductObserver) -> StoreResult<ProductObserver> {
        let mut observers = self.observers.write().await;
        match observers.get_mut(&observer.id) {
            Some(slot) => {
                *slot = observer.clone();
                Ok(observer)
            }
            None => Err(StoreError::not_found("product observer", observer.id)),
        }
    }
}
