//! Record store contract for product rows

use async_trait::async_trait;

use super::pool::DbError;
use crate::domain::{Product, ProductDraft};

/// Persistence operations for products
///
/// Failures propagate to the caller untouched; nothing here retries or wraps
/// several statements in a transaction.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Create the products table if it does not exist
    async fn ensure_schema(&self) -> Result<(), DbError>;

    async fn count(&self) -> Result<i64, DbError>;

    /// All rows in insertion order
    async fn list(&self) -> Result<Vec<Product>, DbError>;

    /// Insert a row and return its id
    async fn insert(&self, draft: &ProductDraft, image_ref: &str) -> Result<i32, DbError>;

    /// Replace name, catalog and price. The image reference is only replaced
    /// when one is supplied. Returns the number of rows touched; a missing id
    /// is not an error.
    async fn update(
        &self,
        id: i32,
        draft: &ProductDraft,
        image_ref: Option<&str>,
    ) -> Result<u64, DbError>;

    /// Delete a row. Returns the number of rows removed; a missing id is not an error.
    async fn delete(&self, id: i32) -> Result<u64, DbError>;
}
