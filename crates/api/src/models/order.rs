//! Order domain types.
//!
//! An order joins one user to one product. No HTTP route creates orders yet;
//! the store supports inserting them so the relationship and its foreign keys
//! are exercised.

use serde::Serialize;

use ecommerce_core::{OrderId, Price, ProductId, Quantity, UserId};

use super::{Audit, Product};

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    #[serde(flatten)]
    pub audit: Audit<OrderId>,
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub total_price: Price,
}

impl Order {
    /// The order's ID.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.audit.id
    }
}

/// An order ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub user_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub total_price: Price,
}

impl NewOrder {
    /// An order for `quantity` units of `product`, priced at the product's
    /// current unit price.
    ///
    /// Returns `None` if the total does not fit a price column.
    #[must_use]
    pub fn for_product(user_id: UserId, product: &Product, quantity: Quantity) -> Option<Self> {
        let total_price = product.price.checked_mul(quantity.as_u32())?;
        Some(Self {
            user_id,
            product_id: product.id(),
            quantity,
            total_price,
        })
    }
}
