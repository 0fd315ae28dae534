/**
 * Product Catalog
 *
 * CRUD over product listings plus the per-user watchlist. Mutations check
 * that the caller is the seller (or, for watchlists, the owner) through
 * `ensure_owner` before anything is written. The purchase flow lives in
 * `purchase.rs`.
 */
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::backend::auth::ownership::ensure_owner;
use crate::backend::products::error::CatalogError;
use crate::backend::products::filter::ProductFilter;
use crate::backend::storage::{ObserverStore, ProductStore, StoreError};
use crate::shared::models::{Product, ProductObserver};

#[derive(Clone)]
pub struct ProductCatalog {
    pub(super) products: Arc<dyn ProductStore>,
    observers: Arc<dyn ObserverStore>,
}

impl ProductCatalog {
    pub fn new(products: Arc<dyn ProductStore>, observers: Arc<dyn ObserverStore>) -> Self {
        Self {
            products,
            observers,
        }
    }

    /// List a new product with the caller as seller
    pub async fn add_product(&self, seller: Uuid, mut product: Product) -> Result<Product, CatalogError> {
        product.validate()?;

        let now = Utc::now();
        product.id = Uuid::new_v4();
        product.seller_id = seller;
        product.images = Vec::new();
        product.created_at = now;
        product.updated_at = now;

        let product = self.products.insert_product(product).await?;
        tracing::info!(product_id = %product.id, seller_id = %seller, "Product listed: {}", product.name);
        Ok(product)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, CatalogError> {
        Ok(self.products.get_product(id).await?)
    }

    pub async fn list_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, CatalogError> {
        Ok(filter.apply(self.products.list_products().await?))
    }

    pub async fn list_products_of(&self, seller: Uuid) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list_products_of(seller).await?)
    }

    /// Load a product the caller is allowed to modify
    pub async fn owned_product(
        &self,
        actor: Uuid,
        id: Uuid,
        action: &'static str,
    ) -> Result<Product, CatalogError> {
        let product = self.products.get_product(id).await?;
        ensure_owner(actor, product.seller_id, "product", action)?;
        Ok(product)
    }

    /// Replace the editable fields of a listing
    ///
    /// Identity, seller, images and creation time are kept.
    pub async fn update_product(
        &self,
        actor: Uuid,
        id: Uuid,
        update: Product,
    ) -> Result<Product, CatalogError> {
        let current = self.owned_product(actor, id, "update").await?;
        update.validate()?;

        let product = Product {
            id: current.id,
            seller_id: current.seller_id,
            images: current.images,
            created_at: current.created_at,
            updated_at: Utc::now(),
            ..update
        };

        Ok(self.products.update_product(product).await?)
    }

    pub async fn delete_product(&self, actor: Uuid, id: Uuid) -> Result<(), CatalogError> {
        self.owned_product(actor, id, "delete").await?;
        self.products.delete_product(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Append uploaded picture URLs to a listing
    pub async fn add_images(
        &self,
        actor: Uuid,
        id: Uuid,
        urls: Vec<String>,
    ) -> Result<Product, CatalogError> {
        if urls.is_empty() {
            return Err(CatalogError::NoPictures);
        }
        self.owned_product(actor, id, "upload pictures for").await?;
        Ok(self.products.append_images(id, urls).await?)
    }

    /// The caller's watchlist, or an unsaved empty one
    pub async fn observer_of(&self, user_id: Uuid) -> Result<ProductObserver, CatalogError> {
        Ok(self
            .observers
            .find_observer_of(user_id)
            .await?
            .unwrap_or_else(|| ProductObserver::empty_for(user_id)))
    }

    /// Create or overwrite the caller's watchlist
    ///
    /// A nil id creates the watchlist (or overwrites the caller's existing
    /// one); any other id must name a watchlist the caller owns.
    pub async fn update_observer(
        &self,
        actor: Uuid,
        mut observer: ProductObserver,
    ) -> Result<ProductObserver, CatalogError> {
        observer.user_id = actor;

        if observer.is_unsaved() {
            if let Some(existing) = self.observers.find_observer_of(actor).await? {
                observer.id = existing.id;
                return Ok(self.observers.update_observer(observer).await?);
            }

            observer.id = Uuid::new_v4();
            return match self.observers.insert_observer(observer.clone()).await {
                Ok(created) => Ok(created),
                // Lost a race with a concurrent first save; overwrite that one.
                Err(StoreError::Duplicate { .. }) => {
                    let existing = self
                        .observers
                        .find_observer_of(actor)
                        .await?
                        .ok_or_else(|| StoreError::not_found("product observer", actor))?;
                    observer.id = existing.id;
                    Ok(self.observers.update_observer(observer).await?)
                }
                Err(err) => Err(err.into()),
            };
        }

        let stored = self.observers.get_observer(observer.id).await?;
        ensure_owner(actor, stored.user_id, "watchlist", "update")?;
        Ok(self.observers.update_observer(observer).await?)
    }
}
