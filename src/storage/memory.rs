//! In-memory object store for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{ObjectKey, ObjectStore, StorageError};

pub const TEST_BASE_URL: &str = "https://test-bucket.s3.local";

#[derive(Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, (Vec<u8>, String)>>,
    fail_uploads: bool,
}

impl MemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose every upload fails, as with bad credentials
    pub fn failing() -> Self {
        Self {
            fail_uploads: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.objects.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &ObjectKey, data: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        if self.fail_uploads {
            return Err(StorageError::UploadFailed("access denied".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), (data, content_type.to_string()));
        Ok(())
    }

    fn reference_for(&self, key: &ObjectKey) -> String {
        format!("{}/{}", TEST_BASE_URL, key)
    }

    async fn resolve(&self, reference: &str) -> Result<String, StorageError> {
        Ok(reference.to_string())
    }
}
