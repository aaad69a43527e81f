//! Order routes: checkout and order history

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::{
    cart,
    error::ApiError,
    extract::Payload,
    middleware::{AuthUser, current_user},
    models::order::OrderResponse,
    state::AppState,
};

/// List the authenticated user's orders, newest first
pub async fn list_orders(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &auth).await?;

    let orders = state
        .order_repository
        .list_for_user(user.id)
        .await
        .map_err(|e| {
            error!("Failed to list orders for user {}: {}", user.id, e);
            ApiError::InternalServerError
        })?;

    let orders: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();

    Ok(Json(json!({ "orders": orders })))
}

/// Create an order from the user's cart, then clear the cart
///
/// The server-side cart is authoritative. Only when it is empty does a
/// client-supplied item list act as a fallback, after normalization; a cart
/// that is empty both server side and client side fails checkout.
pub async fn create_order(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Option<Payload<Value>>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &auth).await?;

    let items = if user.cart_items.is_empty() {
        let body = payload.as_ref().map(|Payload(value)| value);
        cart::normalize_items(body.and_then(|value| value.get("items")))
    } else {
        user.cart_items
    };

    if items.is_empty() {
        return Err(ApiError::EmptyCart);
    }

    let total = cart::cart_total(&items)?;

    let order = state
        .order_repository
        .create_from_cart(user.id, &items, total)
        .await
        .map_err(|e| {
            error!("Failed to create order for user {}: {}", user.id, e);
            ApiError::InternalServerError
        })?;

    info!("Created order {} for user {}", order.id, user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order placed successfully.",
            "order": OrderResponse::from(order),
        })),
    ))
}
