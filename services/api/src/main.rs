use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod auth;
mod cart;
mod catalog;
mod error;
mod extract;
mod middleware;
mod models;
mod repositories;
mod routes;
mod search;
mod state;
mod validation;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::{
    auth::{AuthConfig, AuthService},
    cart::CartService,
    repositories::{CatalogRepository, OrderRepository, UserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting storefront API service");

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let auth_config = AuthConfig::from_env()?;
    let auth_service = AuthService::new(&auth_config);

    // Initialize repositories and services
    let user_repository = UserRepository::new(pool.clone());
    let order_repository = OrderRepository::new(pool.clone());
    let catalog_repository = CatalogRepository::new(pool.clone());
    let cart_service = CartService::new(user_repository.clone());

    let app_state = AppState {
        db_pool: pool,
        auth_service,
        user_repository,
        order_repository,
        catalog_repository,
        cart_service,
    };

    info!("Storefront API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Storefront API service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
