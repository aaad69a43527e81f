//! Repositories for database operations

pub mod catalog;
pub mod order;
pub mod user;

pub use catalog::CatalogRepository;
pub use order::OrderRepository;
pub use user::UserRepository;
