//! Product creation.

use thiserror::Error;

use super::validation::{ValidationError, ensure_product_available};
use crate::db::{EntityStore, RepositoryError, UniqueField};
use crate::models::{NewProduct, Product};

/// Errors from [`ProductService::create`].
#[derive(Debug, Error)]
pub enum CreateProductError {
    /// A live product already has this name.
    #[error("{0}")]
    Duplicate(UniqueField),

    /// The uniqueness lookup failed.
    #[error("product lookup failed: {0}")]
    Lookup(RepositoryError),

    /// The insert failed for a reason other than a duplicate.
    #[error("product insert failed: {0}")]
    Insert(RepositoryError),
}

impl From<ValidationError> for CreateProductError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Duplicate(field) => Self::Duplicate(field),
            ValidationError::Lookup(e) => Self::Lookup(e),
        }
    }
}

/// Creates products against a borrowed store.
pub struct ProductService<'a> {
    store: &'a dyn EntityStore,
}

impl<'a> ProductService<'a> {
    /// Create a new product service.
    #[must_use]
    pub const fn new(store: &'a dyn EntityStore) -> Self {
        Self { store }
    }

    /// Validate and insert a product.
    ///
    /// # Errors
    ///
    /// Returns `CreateProductError` describing the step that failed.
    pub async fn create(&self, product: NewProduct) -> Result<Product, CreateProductError> {
        ensure_product_available(self.store, &product).await?;

        let product = self
            .store
            .insert_product(&product)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(field) => CreateProductError::Duplicate(field),
                other => CreateProductError::Insert(other),
            })?;

        tracing::info!(product_id = %product.id(), "Product created");
        Ok(product)
    }
}
