//! Cart mutation logic and cart-to-order helpers
//!
//! The mutation rules live in pure functions over the embedded item list so
//! they can be tested without a database:
//!
//! - adding merges by id (quantities accumulate, existing attributes win),
//! - updating replaces the quantity, with delete-by-zero semantics,
//! - removing is idempotent, and clearing empties the list.
//!
//! [`CartService`] wraps the pure functions in a load-mutate-save cycle
//! guarded by an optimistic compare-and-swap on the user's cart version, so
//! two interleaved requests for the same user cannot silently lose an
//! update. A stale save is retried a bounded number of times.

use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::user::CartItem;
use crate::repositories::UserRepository;

/// How many times a cart save is retried after losing a version race
const MAX_SAVE_ATTEMPTS: u32 = 3;

/// Add an item to the cart, merging by id
///
/// If an entry with the same id already exists its quantity is incremented;
/// its price and attributes are kept as stored, not overwritten by the new
/// request. Otherwise the item is appended.
pub fn add_item(items: &mut Vec<CartItem>, new_item: CartItem) {
    if let Some(existing) = items.iter_mut().find(|entry| entry.id == new_item.id) {
        // Saturate so repeated adds can never wrap the quantity negative.
        existing.quantity = existing.quantity.saturating_add(new_item.quantity);
    } else {
        items.push(new_item);
    }
}

/// Replace the quantity of an existing cart entry
///
/// A quantity of zero or below removes the entry entirely. Returns
/// `NotFound` when the id is not in the cart.
pub fn update_quantity(items: &mut Vec<CartItem>, id: &str, quantity: i64) -> Result<(), ApiError> {
    let Some(item) = items.iter_mut().find(|entry| entry.id == id) else {
        return Err(ApiError::NotFound("Item not found in cart.".to_string()));
    };

    if quantity <= 0 {
        items.retain(|entry| entry.id != id);
    } else {
        item.quantity = quantity;
    }

    Ok(())
}

/// Remove one entry by id, or clear the whole cart when no id is supplied
///
/// Removing a non-existent id is not an error.
pub fn remove_item(items: &mut Vec<CartItem>, id: Option<&str>) {
    match id {
        Some(id) => items.retain(|entry| entry.id != id),
        None => items.clear(),
    }
}

/// Exact order total: the sum of price x quantity over all items
///
/// A total that exceeds the decimal range is a payload error, not a panic.
pub fn cart_total(items: &[CartItem]) -> Result<Decimal, ApiError> {
    let mut total = Decimal::ZERO;
    for item in items {
        let line = item
            .price
            .checked_mul(Decimal::from(item.quantity))
            .ok_or_else(total_out_of_range)?;
        total = total.checked_add(line).ok_or_else(total_out_of_range)?;
    }

    Ok(total)
}

fn total_out_of_range() -> ApiError {
    ApiError::InvalidPayload("Order total is out of range.".to_string())
}

/// Defensively normalize a client-supplied item list
///
/// Used as the checkout fallback when the server-side cart is empty and the
/// client's local cart raced ahead. Each entry must resolve to a non-empty
/// string id and title, a parseable non-negative price, and an integer
/// quantity above zero; entries failing normalization are silently dropped
/// rather than rejecting the whole request.
pub fn normalize_items(raw: Option<&Value>) -> Vec<CartItem> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let id = coerce_string(entry.get("id"))?;
            let title = coerce_string(entry.get("title"))?;
            let price = coerce_decimal(entry.get("price"))?;
            let quantity = coerce_integer(entry.get("quantity"))?;

            if price < Decimal::ZERO || quantity <= 0 {
                return None;
            }

            Some(CartItem {
                id,
                title,
                price,
                quantity,
                category: coerce_string(entry.get("category")),
                degree: coerce_string(entry.get("degree")),
                condition: coerce_string(entry.get("condition")),
                description: coerce_string(entry.get("description")),
            })
        })
        .collect()
}

fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn coerce_decimal(value: Option<&Value>) -> Option<Decimal> {
    match value {
        Some(Value::Number(n)) => n.to_string().parse().ok(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_integer(value: Option<&Value>) -> Option<i64> {
    match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Authorization-gated mutation service for one user's embedded cart
#[derive(Clone)]
pub struct CartService {
    users: UserRepository,
}

impl CartService {
    /// Create a new cart service
    pub fn new(users: UserRepository) -> Self {
        Self { users }
    }

    /// Read the current cart of a user
    pub async fn read(&self, user_id: Uuid) -> Result<Vec<CartItem>, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| {
                error!("Failed to load user {}: {}", user_id, e);
                ApiError::InternalServerError
            })?
            .ok_or(ApiError::Unauthorized)?;

        Ok(user.cart_items)
    }

    /// Load a user's cart, apply a mutation, and save it back
    ///
    /// The save compares the cart version read at load time; a stale save
    /// loses the race and the whole cycle is retried.
    pub async fn mutate<F>(&self, user_id: Uuid, apply: F) -> Result<Vec<CartItem>, ApiError>
    where
        F: Fn(&mut Vec<CartItem>) -> Result<(), ApiError>,
    {
        for attempt in 1..=MAX_SAVE_ATTEMPTS {
            let user = self
                .users
                .find_by_id(user_id)
                .await
                .map_err(|e| {
                    error!("Failed to load user {}: {}", user_id, e);
                    ApiError::InternalServerError
                })?
                .ok_or(ApiError::Unauthorized)?;

            let mut items = user.cart_items;
            apply(&mut items)?;

            let saved = self
                .users
                .save_cart(user_id, &items, user.cart_version)
                .await
                .map_err(|e| {
                    error!("Failed to save cart for user {}: {}", user_id, e);
                    ApiError::InternalServerError
                })?;

            if saved {
                return Ok(items);
            }

            warn!(
                "Cart version conflict for user {} (attempt {}/{})",
                user_id, attempt, MAX_SAVE_ATTEMPTS
            );
        }

        error!("Giving up on cart save for user {} after repeated version conflicts", user_id);
        Err(ApiError::InternalServerError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(id: &str, price: Decimal, quantity: i64) -> CartItem {
        CartItem {
            id: id.to_string(),
            title: format!("Item {}", id),
            price,
            quantity,
            category: None,
            degree: None,
            condition: None,
            description: None,
        }
    }

    #[test]
    fn adding_a_new_item_appends_exactly_one_entry() {
        let mut items = Vec::new();
        add_item(&mut items, item("1", Decimal::new(4550, 2), 3));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn adding_an_existing_id_accumulates_quantity_without_duplicating() {
        let mut items = vec![item("1", Decimal::new(4550, 2), 2)];

        // The second request carries a different price; the stored entry's
        // attributes must win.
        add_item(&mut items, item("1", Decimal::new(9999, 2), 5));

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 7);
        assert_eq!(items[0].price, Decimal::new(4550, 2));
    }

    #[test]
    fn adding_preserves_insertion_order() {
        let mut items = Vec::new();
        add_item(&mut items, item("1", Decimal::ONE, 1));
        add_item(&mut items, item("2", Decimal::ONE, 1));
        add_item(&mut items, item("3", Decimal::ONE, 1));
        add_item(&mut items, item("2", Decimal::ONE, 1));

        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn update_replaces_the_quantity_rather_than_adding() {
        let mut items = vec![item("1", Decimal::ONE, 4)];

        update_quantity(&mut items, "1", 2).expect("update");
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn update_to_zero_or_below_removes_the_entry() {
        let mut items = vec![item("1", Decimal::ONE, 4), item("2", Decimal::ONE, 1)];

        update_quantity(&mut items, "1", 0).expect("update to zero");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");

        update_quantity(&mut items, "2", -3).expect("update below zero");
        assert!(items.is_empty());
    }

    #[test]
    fn update_of_an_unknown_id_fails_with_not_found() {
        let mut items = vec![item("1", Decimal::ONE, 1)];

        let err = update_quantity(&mut items, "99", 2).expect_err("should fail");
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn removing_a_nonexistent_id_leaves_the_cart_unchanged() {
        let mut items = vec![item("1", Decimal::ONE, 1)];

        remove_item(&mut items, Some("99"));
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn removing_without_an_id_clears_the_cart() {
        let mut items = vec![item("1", Decimal::ONE, 1), item("2", Decimal::ONE, 2)];

        remove_item(&mut items, None);
        assert!(items.is_empty());
    }

    #[test]
    fn total_is_the_exact_sum_of_price_times_quantity() {
        let items = vec![
            item("1", Decimal::new(6767, 2), 2),  // 135.34
            item("2", Decimal::new(1299, 2), 3),  // 38.97
            item("3", Decimal::new(250, 2), 1),   // 2.50
        ];

        assert_eq!(cart_total(&items).expect("total"), Decimal::new(17681, 2));
    }

    #[test]
    fn total_of_an_empty_cart_is_zero() {
        assert_eq!(cart_total(&[]).expect("total"), Decimal::ZERO);
    }

    #[test]
    fn total_overflow_is_an_error_not_a_panic() {
        let items = vec![item("1", Decimal::MAX, 2)];

        let err = cart_total(&items).expect_err("should overflow");
        assert!(matches!(err, ApiError::InvalidPayload(_)));

        let items = vec![item("1", Decimal::MAX, 1), item("2", Decimal::MAX, 1)];
        assert!(cart_total(&items).is_err());
    }

    #[test]
    fn adding_saturates_the_quantity_instead_of_wrapping() {
        let mut items = vec![item("1", Decimal::ONE, i64::MAX - 1)];

        add_item(&mut items, item("1", Decimal::ONE, 5));

        assert_eq!(items[0].quantity, i64::MAX);
        assert!(items[0].quantity >= 1);
    }

    #[test]
    fn normalize_keeps_well_formed_entries_and_drops_the_rest() {
        let payload = json!([
            { "id": "1", "title": "Book", "price": 45.50, "quantity": 2 },
            { "id": "", "title": "No id", "price": 1, "quantity": 1 },
            { "id": "3", "title": "No price", "quantity": 1 },
            { "id": "4", "title": "Zero quantity", "price": 5, "quantity": 0 },
            { "id": "5", "title": "Negative quantity", "price": 5, "quantity": -2 },
            { "id": "6", "price": 5, "quantity": 1 },
            "not-an-object"
        ]);

        let items = normalize_items(Some(&payload));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[0].price, Decimal::new(4550, 2));
        assert_eq!(items[0].quantity, 2);
    }

    #[test]
    fn normalize_drops_entries_with_a_negative_price() {
        let payload = json!([
            { "id": "1", "title": "Refund hack", "price": "-50.00", "quantity": 2 },
            { "id": "2", "title": "Book", "price": -1, "quantity": 1 },
            { "id": "3", "title": "Free", "price": 0, "quantity": 1 }
        ]);

        let items = normalize_items(Some(&payload));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "3");
        assert_eq!(items[0].price, Decimal::ZERO);
        assert!(cart_total(&items).expect("total") >= Decimal::ZERO);
    }

    #[test]
    fn normalize_coerces_numeric_ids_and_string_prices() {
        let payload = json!([
            { "id": 7, "title": "Numeric id", "price": "12.99", "quantity": "3",
              "category": "Pens", "condition": "New" }
        ]);

        let items = normalize_items(Some(&payload));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "7");
        assert_eq!(items[0].price, Decimal::new(1299, 2));
        assert_eq!(items[0].quantity, 3);
        assert_eq!(items[0].category.as_deref(), Some("Pens"));
        assert_eq!(items[0].condition.as_deref(), Some("New"));
        assert!(items[0].degree.is_none());
    }

    #[test]
    fn normalize_of_missing_or_non_array_payloads_is_empty() {
        assert!(normalize_items(None).is_empty());
        assert!(normalize_items(Some(&json!("items"))).is_empty());
        assert!(normalize_items(Some(&json!({ "items": [] }))).is_empty());
        assert!(normalize_items(Some(&json!([]))).is_empty());
    }
}
