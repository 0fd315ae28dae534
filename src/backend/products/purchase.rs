/**
 * Purchase Commit
 *
 * `buy_products` runs in two passes:
 *
 * 1. Validation: every line must name an existing product the buyer does not
 *    sell, with a quantity of at least 1 that the current stock covers. The
 *    total is accumulated for the receipt.
 * 2. Commit: each line is reserved with a conditional decrement
 *    (`quantity >= n`). If any reservation fails, every line already reserved
 *    is released again and the purchase fails with `InsufficientStock`.
 *
 * Two buyers racing for the last unit therefore cannot both succeed, and a
 * failed cart leaves every stock level as it was. Credits are not debited.
 */
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::products::catalog::ProductCatalog;
use crate::backend::products::error::CatalogError;

/// Product id to requested units
///
/// Ordered so concurrent carts reserve overlapping products in the same order.
pub type Cart = BTreeMap<Uuid, u32>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseLine {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseReceipt {
    pub lines: Vec<PurchaseLine>,
    pub total: f64,
}

impl ProductCatalog {
    pub async fn buy_products(&self, buyer: Uuid, cart: Cart) -> Result<PurchaseReceipt, CatalogError> {
        if cart.is_empty() {
            return Err(CatalogError::EmptyCart);
        }

        let mut lines = Vec::with_capacity(cart.len());
        for (&product_id, &requested) in &cart {
            if requested == 0 || i32::try_from(requested).is_err() {
                return Err(CatalogError::InvalidQuantity {
                    product_id,
                    requested: u64::from(requested),
                });
            }

            let product = self.products.get_product(product_id).await?;
            if product.is_sold_by(buyer) {
                tracing::warn!(%buyer, %product_id, "Buyer tried to purchase own product");
                return Err(CatalogError::OwnerCannotBuy { product_id });
            }
            if i64::from(requested) > i64::from(product.quantity) {
                return Err(CatalogError::InsufficientStock {
                    product_id,
                    requested,
                    available: product.quantity,
                });
            }

            let subtotal = product.price * f64::from(requested);
            lines.push(PurchaseLine {
                product_id,
                name: product.name,
                quantity: requested,
                unit_price: product.price,
                subtotal,
            });
        }

        let mut reserved: Vec<(Uuid, i32)> = Vec::with_capacity(lines.len());
        for line in &lines {
            // Validated above to fit in i32
            let units = line.quantity as i32;
            match self.products.reserve_stock(line.product_id, units).await {
                Ok(true) => reserved.push((line.product_id, units)),
                Ok(false) => {
                    self.release(&reserved).await;
                    let available = match self.products.get_product(line.product_id).await {
                        Ok(product) => product.quantity,
                        Err(err) => {
                            tracing::error!(
                                product_id = %line.product_id,
                                "Failed to read stock after a refused reservation: {}",
                                err
                            );
                            0
                        }
                    };
                    tracing::warn!(
                        product_id = %line.product_id,
                        requested = line.quantity,
                        available,
                        "Stock ran out during purchase"
                    );
                    return Err(CatalogError::InsufficientStock {
                        product_id: line.product_id,
                        requested: line.quantity,
                        available,
                    });
                }
                Err(err) => {
                    self.release(&reserved).await;
                    return Err(err.into());
                }
            }
        }

        let total: f64 = lines.iter().map(|l| l.subtotal).sum();
        tracing::info!(%buyer, lines = lines.len(), total, "Purchase committed");
        Ok(PurchaseReceipt { lines, total })
    }

    async fn release(&self, reserved: &[(Uuid, i32)]) {
        for &(product_id, units) in reserved {
            if let Err(err) = self.products.release_stock(product_id, units).await {
                tracing::error!(%product_id, units, "Failed to release reserved stock: {}", err);
            }
        }
    }
}
