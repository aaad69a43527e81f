//! Common library for the UniQ storefront
//!
//! This crate provides shared functionality used across the UniQ
//! application, including database connectivity and error handling.

pub mod database;
pub mod error;
