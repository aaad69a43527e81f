//! User model and its embedded cart

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity
///
/// A user owns its embedded cart exclusively; no other entity mutates it.
/// `cart_version` is an optimistic concurrency token bumped on every cart
/// write, so a stale save never clobbers a newer one.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cart_items: Vec<CartItem>,
    pub cart_version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart entry embedded in a user record, and copied verbatim into orders
///
/// `id` references a catalog item id but is not validated against the
/// catalog at write time. Invariant: `quantity >= 1`; an entry whose
/// quantity would drop to zero or below is removed instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub title: String,
    pub price: Decimal,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Public profile slice of a user, safe to return to clients
///
/// The password hash never leaves the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_item_serialization_omits_absent_facets() {
        let item = CartItem {
            id: "1".to_string(),
            title: "SOFTENG310 Course Book".to_string(),
            price: Decimal::new(6767, 2),
            quantity: 2,
            category: Some("Software Engineering".to_string()),
            degree: None,
            condition: None,
            description: None,
        };

        let value = serde_json::to_value(&item).expect("serialize cart item");
        assert_eq!(value["id"], "1");
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["category"], "Software Engineering");
        assert!(value.get("degree").is_none());
        assert!(value.get("condition").is_none());
    }

    #[test]
    fn user_profile_never_exposes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "student@example.com".to_string(),
            password_hash: "secret-hash".to_string(),
            first_name: Some("Ada".to_string()),
            last_name: None,
            cart_items: vec![],
            cart_version: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let profile = UserProfile::from(&user);
        let value = serde_json::to_value(&profile).expect("serialize profile");
        assert_eq!(value["email"], "student@example.com");
        assert_eq!(value["firstName"], "Ada");
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
    }
}
