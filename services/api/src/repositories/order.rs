//! Order repository for database operations

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use crate::models::order::Order;
use crate::models::user::CartItem;

/// Order repository
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist an order and empty the owning user's cart as one transaction
    ///
    /// A crash can never leave the order created with the cart items still
    /// present; either both writes land or neither does.
    pub async fn create_from_cart(
        &self,
        user_id: Uuid,
        items: &[CartItem],
        total: Decimal,
    ) -> Result<Order> {
        info!("Creating order for user {} ({} items)", user_id, items.len());

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, items, total)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, items, total, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(Json(items))
        .bind(total)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET cart_items = '[]'::jsonb, cart_version = cart_version + 1, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(order_from_row(&row))
    }

    /// List a user's orders, newest first
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, items, total, created_at, updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }
}

fn order_from_row(row: &PgRow) -> Order {
    let Json(items): Json<Vec<CartItem>> = row.get("items");

    Order {
        id: row.get("id"),
        user_id: row.get("user_id"),
        items,
        total: row.get("total"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
