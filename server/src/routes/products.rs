//! Product lookup routes.

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Serialize;

use crate::routes::error::ApiError;
use crate::services::catalog::{CatalogError, Product};
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomProductResponse {
    pub product_id: String,
}

/// `GET /api/product/{product_id}`: fetch one product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state.catalog.get(&product_id)?;
    Ok(Json(product.clone()))
}

/// `GET /api/debug/random-product-id`: stand-in for tapping an NFC tag.
pub async fn random_product_id(State(state): State<AppState>) -> Result<Json<RandomProductResponse>, ApiError> {
    let product_id = state
        .catalog
        .random_id()
        .ok_or_else(|| CatalogError::NotFound("<any>".into()))?;
    Ok(Json(RandomProductResponse { product_id: product_id.to_owned() }))
}

#[cfg(test)]
#[path = "products_test.rs"]
mod tests;
