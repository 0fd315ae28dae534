//! Product Data Structure
//!
//! Represents a listing offered by a seller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::models::{check_length, Category};

pub const PRODUCT_NAME_MAX_LEN: usize = 50;
pub const DETAILS_MAX_LEN: usize = 500;
pub const PRICE_MIN: f64 = 0.1;
pub const QUANTITY_MIN: i32 = 1;
pub const QUANTITY_MAX: i32 = 100;

/// A product listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product ID (nil until stored)
    #[serde(default)]
    pub id: Uuid,
    /// The user selling this product; set by the server from the caller
    #[serde(default)]
    pub seller_id: Uuid,
    pub name: String,
    pub price: f64,
    /// URLs of uploaded pictures
    #[serde(default)]
    pub images: Vec<String>,
    pub details: String,
    /// Units in stock
    pub quantity: i32,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Check a submitted listing against the catalog rules
    pub fn validate(&self) -> Result<(), SharedError> {
        check_length("name", &self.name, 1, PRODUCT_NAME_MAX_LEN)?;
        check_length("details", &self.details, 1, DETAILS_MAX_LEN)?;

        if !self.price.is_finite() || self.price < PRICE_MIN {
            return Err(SharedError::validation(
                "price",
                format!("must be at least {PRICE_MIN}"),
            ));
        }

        if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&self.quantity) {
            return Err(SharedError::validation(
                "quantity",
                format!("must be between {QUANTITY_MIN} and {QUANTITY_MAX}"),
            ));
        }

        Ok(())
    }

    pub fn is_sold_by(&self, user_id: Uuid) -> bool {
        self.seller_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn listing() -> Product {
        Product {
            id: Uuid::nil(),
            seller_id: Uuid::new_v4(),
            name: "Desk lamp".to_string(),
            price: 19.99,
            images: Vec::new(),
            details: "Brass, barely used".to_string(),
            quantity: 5,
            category: Category::Electronics,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_valid_listing() {
        assert!(listing().validate().is_ok());
    }

    #[test]
    fn test_price_must_be_positive() {
        let mut product = listing();
        product.price = 0.0;
        assert!(product.validate().is_err());
        product.price = f64::NAN;
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        let mut product = listing();
        product.quantity = 0;
        assert!(product.validate().is_err());
        product.quantity = 101;
        assert!(product.validate().is_err());
    }

    #[test]
    fn test_deserialize_without_server_fields() {
        let product: Product = serde_json::from_str(
            r#"{"name":"Book","price":4.5,"details":"Paperback","quantity":2,"category":1}"#,
        )
        .unwrap();
        assert!(product.id.is_nil());
        assert!(product.seller_id.is_nil());
        assert!(product.images.is_empty());
        assert_eq!(product.category, Category::Books);
    }

    proptest! {
        #[test]
        fn test_quantity_in_range_is_accepted(quantity in QUANTITY_MIN..=QUANTITY_MAX) {
            let mut product = listing();
            product.quantity = quantity;
            prop_assert!(product.validate().is_ok());
        }

        #[test]
        fn test_quantity_above_range_is_rejected(quantity in (QUANTITY_MAX + 1)..10_000i32) {
            let mut product = listing();
            product.quantity = quantity;
            prop_assert!(product.validate().is_err());
        }
    }
}
