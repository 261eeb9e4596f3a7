use axum::{
    extract::State,
    response::{Html, Json},
};

use crate::database::models::Product;
use crate::error::{ApiError, PageError};
use crate::state::AppState;
use crate::views;

/// GET /view_products - every product as a bare JSON array
///
/// ```json
/// [{ "id": 1, "product_name": "Chair", "price": 100.0, "currency": "KGS",
///    "photo_path": null, "category": "Furniture", "description": null }]
/// ```
#[tracing::instrument(skip_all)]
pub async fn view_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.store.list_all().await?;
    tracing::debug!("Listing {} products as JSON", products.len());
    Ok(Json(products))
}

/// GET / - rendered public listing
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let products = state.store.list_all().await?;
    Ok(views::product_listing(&products))
}
