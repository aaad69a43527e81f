//! Catalog repository for database operations
//!
//! Each product variant lives in its own table with its own facet columns;
//! rows are mapped into the shared [`CatalogItem`] shape with absent facets
//! left unset. The catalog is seeded once and read-only afterwards, except
//! the course-book view counter.

use anyhow::Result;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::models::catalog::{CatalogItem, ProductType};

/// Catalog repository
#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    /// Create a new catalog repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Load every item of one variant, in stored id order
    pub async fn list(&self, product_type: ProductType) -> Result<Vec<CatalogItem>> {
        let query = format!("{} ORDER BY id", select_clause(product_type));
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| item_from_row(product_type, row))
            .collect())
    }

    /// Find a single item of a variant by its numeric id
    pub async fn find_by_id(
        &self,
        product_type: ProductType,
        id: i32,
    ) -> Result<Option<CatalogItem>> {
        let query = format!("{} WHERE id = $1", select_clause(product_type));
        let row = sqlx::query(&query).bind(id).fetch_optional(&self.pool).await?;

        Ok(row.as_ref().map(|row| item_from_row(product_type, row)))
    }

    /// Increment a course book's view counter
    pub async fn increment_view_count(&self, id: i32) -> Result<()> {
        sqlx::query("UPDATE course_books SET view_count = view_count + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Newest course books by id, for the home page carousel
    pub async fn newest_books(&self, limit: i64) -> Result<Vec<CatalogItem>> {
        let query = format!(
            "{} ORDER BY id DESC LIMIT $1",
            select_clause(ProductType::CourseBooks)
        );
        let rows = sqlx::query(&query).bind(limit).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(|row| item_from_row(ProductType::CourseBooks, row))
            .collect())
    }
}

fn select_clause(product_type: ProductType) -> String {
    let columns = match product_type {
        ProductType::CourseBooks => {
            "id, title, category, degree, major, year, condition, price, description, view_count"
        }
        ProductType::NotebooksAndPads => {
            "id, title, type, cover_type, page_style, price, description"
        }
        ProductType::WritingSupplies => {
            "id, title, category, type, colour, ink_type, price, description"
        }
        ProductType::Other => "id, title, category, type, price, description",
    };

    format!("SELECT {} FROM {}", columns, product_type.table())
}

fn item_from_row(product_type: ProductType, row: &PgRow) -> CatalogItem {
    let mut item = CatalogItem {
        id: row.get("id"),
        title: row.get("title"),
        price: row.get("price"),
        description: row.get("description"),
        ..Default::default()
    };

    match product_type {
        ProductType::CourseBooks => {
            item.category = row.get("category");
            item.degree = row.get("degree");
            item.major = row.get("major");
            item.year = row.get("year");
            item.condition = row.get("condition");
            item.view_count = Some(row.get("view_count"));
        }
        ProductType::NotebooksAndPads => {
            item.kind = row.get("type");
            item.cover_type = row.get("cover_type");
            item.page_style = row.get("page_style");
        }
        ProductType::WritingSupplies => {
            item.category = row.get("category");
            item.kind = row.get("type");
            item.colour = row.get("colour");
            item.ink_type = row.get("ink_type");
        }
        ProductType::Other => {
            item.category = row.get("category");
            item.kind = row.get("type");
        }
    }

    item
}
