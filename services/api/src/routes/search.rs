//! Course-book search route

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::{error::ApiError, models::catalog::ProductType, search::search_books, state::AppState};

/// Query parameters for the search endpoint
#[derive(Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search course books by a free-text term
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let term = query.q.as_deref().unwrap_or("").trim().to_string();

    if term.is_empty() {
        return Ok(Json(json!({
            "results": [],
            "query": "",
            "count": 0,
            "message": "Please enter a search term",
        })));
    }

    let books = state
        .catalog_repository
        .list(ProductType::CourseBooks)
        .await
        .map_err(|e| {
            error!("Failed to load course books for search: {}", e);
            ApiError::InternalServerError
        })?;

    let results = search_books(books, &term);
    let count = results.len();
    let message = if count == 0 {
        format!("No results found for \"{}\"", term)
    } else {
        format!("Found {} result(s)", count)
    };

    Ok(Json(json!({
        "results": results,
        "query": term,
        "count": count,
        "message": message,
    })))
}
