//! Cart routes
//!
//! All four operations run against exactly one authenticated user's
//! embedded cart and return the full updated item list.

use axum::{Extension, Json, extract::State, response::IntoResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    cart,
    error::ApiError,
    extract::Payload,
    middleware::AuthUser,
    models::user::CartItem,
    state::AppState,
};

/// Item fields accepted by the add-to-cart operation
#[derive(Clone, Deserialize)]
pub struct CartItemPayload {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub degree: Option<String>,
    pub condition: Option<String>,
    pub description: Option<String>,
}

/// Request to add an item to the cart
#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub item: Option<CartItemPayload>,
    pub quantity: Option<i64>,
}

/// Request to replace a cart entry's quantity
#[derive(Deserialize)]
pub struct UpdateCartRequest {
    pub id: Option<String>,
    pub quantity: Option<i64>,
}

/// Request to remove one entry, or everything when `id` is omitted
#[derive(Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: Option<String>,
}

/// Full cart response returned by every cart operation
#[derive(Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
}

/// Read the current cart
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.cart_service.read(auth.id).await?;

    Ok(Json(CartResponse { items }))
}

/// Add an item, merging by id with any existing entry
pub async fn add_to_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<AddToCartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item = payload.item.ok_or_else(invalid_item_payload)?;
    let id = item.id.filter(|v| !v.is_empty()).ok_or_else(invalid_item_payload)?;
    let title = item
        .title
        .filter(|v| !v.is_empty())
        .ok_or_else(invalid_item_payload)?;
    let price = item.price.ok_or_else(invalid_item_payload)?;
    if price < Decimal::ZERO {
        return Err(invalid_item_payload());
    }

    let quantity = payload.quantity.ok_or_else(invalid_item_payload)?;
    if quantity <= 0 {
        return Err(ApiError::InvalidPayload(
            "Quantity must be at least 1.".to_string(),
        ));
    }

    let new_item = CartItem {
        id,
        title,
        price,
        quantity,
        category: item.category,
        degree: item.degree,
        condition: item.condition,
        description: item.description,
    };

    let items = state
        .cart_service
        .mutate(auth.id, move |items| {
            cart::add_item(items, new_item.clone());
            Ok(())
        })
        .await?;

    Ok(Json(CartResponse { items }))
}

/// Replace an entry's quantity; zero or below removes the entry
pub async fn update_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Payload(payload): Payload<UpdateCartRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (Some(id), Some(quantity)) = (payload.id, payload.quantity) else {
        return Err(ApiError::InvalidPayload("Invalid payload.".to_string()));
    };

    let items = state
        .cart_service
        .mutate(auth.id, move |items| cart::update_quantity(items, &id, quantity))
        .await?;

    Ok(Json(CartResponse { items }))
}

/// Remove one entry by id, or clear the cart when no body or id is supplied
pub async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    payload: Option<Payload<RemoveFromCartRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let id = payload.and_then(|Payload(body)| body.id);

    let items = state
        .cart_service
        .mutate(auth.id, move |items| {
            cart::remove_item(items, id.as_deref());
            Ok(())
        })
        .await?;

    Ok(Json(CartResponse { items }))
}

fn invalid_item_payload() -> ApiError {
    ApiError::InvalidPayload("Invalid cart item payload.".to_string())
}
