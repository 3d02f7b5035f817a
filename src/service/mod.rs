//! Product pipeline
//!
//! Sequences image uploads, object-store writes and record-store writes for
//! the request handlers and the first-run seeder.

mod products;
mod seeder;

use thiserror::Error;

use crate::db::DbError;
use crate::storage::StorageError;

pub use products::{ImageUpload, ProductService};
pub use seeder::{SeedOutcome, Seeder};

/// Errors raised while running the product pipeline
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Seed asset {path}: {source}")]
    SeedAsset {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
