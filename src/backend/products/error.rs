use thiserror::Error;
use uuid::Uuid;

use crate::backend::auth::ownership::NotOwner;
use crate::backend::storage::StoreError;
use crate::shared::SharedError;

/// Failures of the product catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("quantity {requested} for product {product_id} must be at least 1")]
    InvalidQuantity { product_id: Uuid, requested: u64 },

    #[error("you cannot buy your own product {product_id}")]
    OwnerCannotBuy { product_id: Uuid },

    #[error("not enough stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: Uuid,
        requested: u32,
        available: i32,
    },

    #[error("No pictures were uploaded")]
    NoPictures,

    #[error(transparent)]
    Validation(#[from] SharedError),

    #[error(transparent)]
    NotOwner(#[from] NotOwner),

    #[error(transparent)]
    Store(#[from] StoreError),
}
