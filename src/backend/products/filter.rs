//! Query filters for `GET /product/get_all`.

use serde::Deserialize;

use crate::shared::models::{Category, Product};
use crate::shared::SharedError;

/// Raw query string, as received
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
    /// Comma-separated category codes, e.g. `0,2`
    pub categories: Option<String>,
    pub price_from: Option<String>,
    pub price_to: Option<String>,
}

/// Parsed filter; every field that is `None` or empty matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub categories: Vec<Category>,
    pub price_from: Option<f64>,
    pub price_to: Option<f64>,
}

impl TryFrom<ProductQuery> for ProductFilter {
    type Error = SharedError;

    /// Unknown or unparseable category entries are skipped; an unparseable
    /// price bound is an error.
    fn try_from(query: ProductQuery) -> Result<Self, Self::Error> {
        let categories = query
            .categories
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|code| code.trim().parse::<i64>().ok())
            .filter_map(Category::from_code)
            .collect();

        Ok(Self {
            name: query.name.filter(|n| !n.is_empty()),
            categories,
            price_from: parse_price("price_from", query.price_from)?,
            price_to: parse_price("price_to", query.price_to)?,
        })
    }
}

fn parse_price(field: &str, raw: Option<String>) -> Result<Option<f64>, SharedError> {
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| SharedError::validation(field, format!("'{value}' is not a number"))),
    }
}

impl ProductFilter {
    /// Name is a case-sensitive substring match; price bounds are inclusive
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(name) = &self.name {
            if !product.name.contains(name.as_str()) {
                return false;
            }
        }
        if self.price_from.is_some_and(|from| product.price < from) {
            return false;
        }
        if self.price_to.is_some_and(|to| product.price > to) {
            return false;
        }
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}
