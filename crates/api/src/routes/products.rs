//! Product route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::error::{ApiJson, Result};
use crate::models::{NewProduct, Product};
use crate::services::ProductService;
use crate::state::AppState;

/// Body of a successful product creation.
#[derive(Debug, Serialize)]
pub struct ProductCreated {
    pub message: &'static str,
    pub product: Product,
}

/// Create a product.
#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(product): ApiJson<NewProduct>,
) -> Result<(StatusCode, Json<ProductCreated>)> {
    let product = ProductService::new(state.store()).create(product).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProductCreated {
            message: "Product created successfully",
            product,
        }),
    ))
}
