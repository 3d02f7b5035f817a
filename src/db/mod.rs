//! Database module for PostgreSQL connectivity
//!
//! Provides connection pool management and the product record store.

pub mod pool;
pub mod products;
pub mod store;

#[cfg(test)]
pub mod memory;

pub use pool::{DbError, DbPool};
pub use products::ProductRepository;
pub use store::ProductStore;
