//! Domain models for the storefront service

pub mod catalog;
pub mod order;
pub mod user;

pub use catalog::{CatalogItem, ProductType};
pub use order::Order;
pub use user::{CartItem, User, UserProfile};
