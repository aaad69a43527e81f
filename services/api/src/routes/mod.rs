//! Storefront service routes

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    middleware::auth_middleware,
    state::AppState,
};

pub mod auth;
pub mod cart;
pub mod orders;
pub mod products;
pub mod search;

/// Create the router for the storefront service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route(
            "/cart",
            get(cart::get_cart)
                .post(cart::add_to_cart)
                .patch(cart::update_cart)
                .delete(cart::remove_from_cart),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/signin", post(auth::signin))
        .route("/auth/logout", post(auth::logout))
        .route("/products", get(products::list_products))
        .route("/products/newest", get(products::newest_products))
        .route("/products/:product_type/:id", get(products::get_product))
        .route("/search", get(search::search))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint, including database connectivity
pub async fn health_check(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    if !common::database::health_check(&state.db_pool).await? {
        return Err(ApiError::InternalServerError);
    }

    Ok(Json(json!({
        "status": "ok",
        "service": "uniq-api"
    })))
}
