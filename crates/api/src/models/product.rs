//! Product domain types.

use serde::{Deserialize, Serialize};

use ecommerce_core::{Price, ProductId, Stock};

use super::{Audit, RequiredText};

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    #[serde(flatten)]
    pub audit: Audit<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
}

impl Product {
    /// The product's ID.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.audit.id
    }
}

/// Payload of a product creation request, already validated by decoding.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: RequiredText,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    pub stock: Stock,
}
