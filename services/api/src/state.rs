//! Application state shared across handlers

use sqlx::PgPool;

use crate::auth::AuthService;
use crate::cart::CartService;
use crate::repositories::{CatalogRepository, OrderRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_repository: UserRepository,
    pub order_repository: OrderRepository,
    pub catalog_repository: CatalogRepository,
    pub cart_service: CartService,
}
