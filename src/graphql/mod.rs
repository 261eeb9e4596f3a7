//! Read-only GraphQL view of the catalog.
//!
//! `products` and `product(id)` expose the same rows as `/view_products`,
//! with the price as a `Float` like on the JSON surface.

use async_graphql::{
    http::GraphiQLSource, Context, EmptyMutation, EmptySubscription, Object, Schema, SimpleObject,
    Variables,
};
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::database::models::Product;
use crate::database::ProductStore;
use crate::error::ApiError;
use crate::state::AppState;

pub type CatalogSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

pub const GRAPHQL_PATH: &str = "/graphql";

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Product")]
pub struct ProductNode {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub category: String,
    pub description: Option<String>,
    pub photo_path: Option<String>,
}

impl From<Product> for ProductNode {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.product_name,
            price: product.price,
            currency: product.currency,
            category: product.category,
            description: product.description,
            photo_path: product.photo_path,
        }
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Every product in the catalog
    async fn products(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<ProductNode>> {
        let store = ctx.data::<Arc<dyn ProductStore>>()?;
        let products = store.list_all().await.map_err(|e| {
            tracing::error!("GraphQL products query failed: {}", e);
            async_graphql::Error::new("Failed to load products")
        })?;
        Ok(products.into_iter().map(ProductNode::from).collect())
    }

    /// A single product, or null when the id is unknown
    async fn product(&self, ctx: &Context<'_>, id: i64) -> async_graphql::Result<Option<ProductNode>> {
        let store = ctx.data::<Arc<dyn ProductStore>>()?;
        let product = store.get_by_id(id).await.map_err(|e| {
            tracing::error!("GraphQL product query failed: {}", e);
            async_graphql::Error::new("Failed to load product")
        })?;
        Ok(product.map(ProductNode::from))
    }
}

pub fn build_schema(store: Arc<dyn ProductStore>) -> CatalogSchema {
    Schema::build(QueryRoot, EmptyMutation, EmptySubscription)
        .data(store)
        .finish()
}

#[derive(Debug, Deserialize)]
pub struct GraphQLParams {
    pub query: Option<String>,
    pub variables: Option<String>,
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,
}

/// GET /graphql - run `?query=...`, or serve GraphiQL when there is none
pub async fn graphql_get(
    State(state): State<AppState>,
    Query(params): Query<GraphQLParams>,
) -> Result<Response, ApiError> {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return Ok(Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish()).into_response());
    };

    let mut request = async_graphql::Request::new(query);
    if let Some(operation_name) = params.operation_name {
        request = request.operation_name(operation_name);
    }
    if let Some(raw) = params.variables.filter(|v| !v.trim().is_empty()) {
        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| ApiError::bad_request(format!("Invalid GraphQL variables: {}", e)))?;
        request = request.variables(Variables::from_json(value));
    }

    Ok(Json(state.graphql.execute(request).await).into_response())
}

/// POST /graphql - standard JSON request body
pub async fn graphql_post(
    State(state): State<AppState>,
    Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response> {
    Json(state.graphql.execute(request).await)
}
