//! Product catalog routes

use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{
    catalog::{self, ProductQuery},
    error::ApiError,
    models::catalog::{CatalogItem, ProductType},
    state::AppState,
};

/// How many newest books the home page shows by default
const DEFAULT_NEWEST_LIMIT: i64 = 8;

/// Query parameters for the newest-books listing
#[derive(Deserialize)]
pub struct NewestQuery {
    pub limit: Option<String>,
}

/// List one catalog variant: filtered, sorted, and paginated
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let product_type = ProductType::parse(
        query.product_type.as_deref().unwrap_or("course-books"),
    )
    .ok_or(ApiError::InvalidProductType)?;

    let items = state
        .catalog_repository
        .list(product_type)
        .await
        .map_err(|e| {
            error!("Failed to load {} catalog: {}", product_type.as_str(), e);
            ApiError::InternalServerError
        })?;

    let page = catalog::run_query(items, &query);

    Ok(Json(json!({
        "products": page.products,
        "pagination": page.pagination,
        "filters": page.filters,
        "productType": product_type.as_str(),
    })))
}

/// Newest course books by id, for the home page
pub async fn newest_products(
    State(state): State<AppState>,
    Query(query): Query<NewestQuery>,
) -> Result<Json<Vec<CatalogItem>>, ApiError> {
    let limit = query
        .limit
        .as_deref()
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(DEFAULT_NEWEST_LIMIT);

    let books = state.catalog_repository.newest_books(limit).await.map_err(|e| {
        error!("Failed to load newest books: {}", e);
        ApiError::InternalServerError
    })?;

    Ok(Json(books))
}

/// Fetch one catalog item by variant and numeric id
///
/// Viewing a course book bumps its view counter; the other variants have no
/// counter.
pub async fn get_product(
    State(state): State<AppState>,
    Path((product_type, id)): Path<(String, String)>,
) -> Result<Json<CatalogItem>, ApiError> {
    let product_type = ProductType::parse(&product_type).ok_or(ApiError::InvalidProductType)?;
    let id: i32 = id
        .trim()
        .parse()
        .map_err(|_| not_found(product_type))?;

    let item = state
        .catalog_repository
        .find_by_id(product_type, id)
        .await
        .map_err(|e| {
            error!("Failed to load {} item {}: {}", product_type.as_str(), id, e);
            ApiError::InternalServerError
        })?
        .ok_or_else(|| not_found(product_type))?;

    if product_type == ProductType::CourseBooks {
        if let Err(e) = state.catalog_repository.increment_view_count(id).await {
            // Losing a view count must not fail the detail fetch.
            error!("Failed to bump view count for book {}: {}", id, e);
        }
    }

    Ok(Json(item))
}

fn not_found(product_type: ProductType) -> ApiError {
    let message = match product_type {
        ProductType::CourseBooks => "Book not found",
        ProductType::NotebooksAndPads => "Notebook not found",
        ProductType::WritingSupplies => "Writing supply not found",
        ProductType::Other => "Item not found",
    };

    ApiError::NotFound(message.to_string())
}
