//! In-memory product store for tests

use async_trait::async_trait;
use std::sync::Mutex;

use super::pool::DbError;
use super::store::ProductStore;
use crate::domain::{Product, ProductDraft};

#[derive(Default)]
pub struct MemoryProductStore {
    rows: Mutex<Vec<Product>>,
    next_id: Mutex<i32>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Product> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        Ok(self.rows.lock().unwrap().len() as i64)
    }

    async fn list(&self) -> Result<Vec<Product>, DbError> {
        Ok(self.snapshot())
    }

    async fn insert(&self, draft: &ProductDraft, image_ref: &str) -> Result<i32, DbError> {
        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;
        self.rows.lock().unwrap().push(Product {
            id: *next_id,
            name: draft.name.clone(),
            catalog: draft.catalog,
            price: draft.price,
            image_url: image_ref.to_string(),
        });
        Ok(*next_id)
    }

    async fn update(
        &self,
        id: i32,
        draft: &ProductDraft,
        image_ref: Option<&str>,
    ) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let Some(row) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(0);
        };
        row.name = draft.name.clone();
        row.catalog = draft.catalog;
        row.price = draft.price;
        if let Some(image_ref) = image_ref {
            row.image_url = image_ref.to_string();
        }
        Ok(1)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok((before - rows.len()) as u64)
    }
}
