//! Storage module for product images
//!
//! Objects are written to an S3 bucket under a `products/` prefix. Whatever
//! reference goes into the database is decided here, by the configured
//! [`UrlPolicy`](crate::config::UrlPolicy), and the same policy turns stored
//! references back into browser URLs.

mod key;
mod s3;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use key::{content_type_for, ObjectKey};
pub use s3::S3Store;

/// Errors that can occur during object storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage not configured: {0}")]
    NotConfigured(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

/// Object store client used by the product pipeline
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `key`
    async fn put(&self, key: &ObjectKey, data: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Reference to persist for an object that was just written
    fn reference_for(&self, key: &ObjectKey) -> String;

    /// Browser URL for a persisted reference
    async fn resolve(&self, reference: &str) -> Result<String, StorageError>;
}
