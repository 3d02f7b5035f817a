//! Upload, store, persist

use std::sync::Arc;
use tracing::{info, instrument};

use super::ServiceError;
use crate::db::ProductStore;
use crate::domain::{Product, ProductDraft};
use crate::storage::{content_type_for, ObjectKey, ObjectStore};

/// An image received from a form or read from disk
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-supplied filename, used only to derive the object key
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Shared handle over the record store and the object store
///
/// Objects are always written before the row that references them. Replaced
/// or deleted rows leave their objects in the bucket.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
    objects: Arc<dyn ObjectStore>,
    key_prefix: String,
}

impl ProductService {
    pub fn new(
        store: Arc<dyn ProductStore>,
        objects: Arc<dyn ObjectStore>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            objects,
            key_prefix: key_prefix.into(),
        }
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        Ok(self.store.count().await?)
    }

    /// All products with `image_url` resolved to a fetchable URL
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let mut products = self.store.list().await?;
        for product in &mut products {
            product.image_url = self.objects.resolve(&product.image_url).await?;
        }
        Ok(products)
    }

    /// Upload the image, then insert the row. Returns the new id.
    #[instrument(skip(self, draft, image), fields(name = %draft.name, file = %image.file_name))]
    pub async fn create(&self, draft: ProductDraft, image: ImageUpload) -> Result<i32, ServiceError> {
        let image_ref = self.store_image(image).await?;
        let id = self.store.insert(&draft, &image_ref).await?;
        info!(product_id = id, "Product created");
        Ok(id)
    }

    /// Replace the editable fields; the image only when a new one is given
    #[instrument(skip(self, draft, image), fields(name = %draft.name))]
    pub async fn update(
        &self,
        id: i32,
        draft: ProductDraft,
        image: Option<ImageUpload>,
    ) -> Result<(), ServiceError> {
        let image_ref = match image {
            Some(image) => Some(self.store_image(image).await?),
            None => None,
        };

        let touched = self.store.update(id, &draft, image_ref.as_deref()).await?;
        if touched == 0 {
            info!(product_id = id, "Update matched no product");
        }
        Ok(())
    }

    /// Remove the row only; the stored image stays in the bucket
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        self.store.delete(id).await?;
        Ok(())
    }

    async fn store_image(&self, image: ImageUpload) -> Result<String, ServiceError> {
        let key = ObjectKey::for_upload(&self.key_prefix, &image.file_name);
        let content_type = image
            .content_type
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| content_type_for(key.extension()).to_string());

        self.objects.put(&key, image.data, &content_type).await?;
        Ok(self.objects.reference_for(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryProductStore;
    use crate::domain::Catalog;
    use crate::storage::memory::{MemoryObjectStore, TEST_BASE_URL};
    use rust_decimal::Decimal;

    fn service() -> (ProductService, Arc<MemoryProductStore>, Arc<MemoryObjectStore>) {
        let store = Arc::new(MemoryProductStore::new());
        let objects = Arc::new(MemoryObjectStore::new());
        let service = ProductService::new(store.clone(), objects.clone(), "products");
        (service, store, objects)
    }

    fn jpeg(name: &str) -> ImageUpload {
        ImageUpload {
            file_name: name.to_string(),
            content_type: Some("image/jpeg".to_string()),
            data: vec![0xFF; 10 * 1024],
        }
    }

    fn kursi() -> ProductDraft {
        ProductDraft::new("Kursi Kayu", Catalog::Furniture, Decimal::from(250_000))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (service, _, objects) = service();

        let id = service.create(kursi(), jpeg("kursi kayu.jpg")).await.unwrap();

        let products = service.list().await.unwrap();
        assert_eq!(products.len(), 1);
        let product = &products[0];
        assert_eq!(product.id, id);
        assert_eq!(product.name, "Kursi Kayu");
        assert_eq!(product.catalog, Catalog::Furniture);
        assert_eq!(product.price, Decimal::from(250_000));

        let key = product.image_url.strip_prefix(&format!("{}/", TEST_BASE_URL)).unwrap();
        assert!(key.starts_with("products/"));
        assert!(key.ends_with("-kursi-kayu.jpg"));
        let (data, content_type) = objects.get(key).unwrap();
        assert_eq!(data.len(), 10 * 1024);
        assert_eq!(content_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_content_type_falls_back_to_extension() {
        let (service, _, objects) = service();
        let mut image = jpeg("photo.png");
        image.content_type = None;

        service.create(kursi(), image).await.unwrap();

        let key = &objects.keys()[0];
        assert_eq!(objects.get(key).unwrap().1, "image/png");
    }

    #[tokio::test]
    async fn test_update_without_image_keeps_reference() {
        let (service, store, objects) = service();
        let id = service.create(kursi(), jpeg("kursi.jpg")).await.unwrap();
        let before = store.snapshot()[0].image_url.clone();

        let draft = ProductDraft::new("Kursi Jati", Catalog::Furniture, Decimal::from(300_000));
        service.update(id, draft, None).await.unwrap();

        let row = &store.snapshot()[0];
        assert_eq!(row.name, "Kursi Jati");
        assert_eq!(row.price, Decimal::from(300_000));
        assert_eq!(row.image_url, before);
        assert_eq!(objects.len(), 1);
    }

    #[tokio::test]
    async fn test_update_with_image_replaces_reference_and_keeps_old_object() {
        let (service, store, objects) = service();
        let id = service.create(kursi(), jpeg("kursi.jpg")).await.unwrap();
        let before = store.snapshot()[0].image_url.clone();

        service.update(id, kursi(), Some(jpeg("kursi-baru.jpg"))).await.unwrap();

        let after = store.snapshot()[0].image_url.clone();
        assert_ne!(after, before);
        assert!(after.ends_with("-kursi-baru.jpg"));
        assert_eq!(objects.len(), 2);
    }

    #[tokio::test]
    async fn test_update_missing_id_is_noop() {
        let (service, store, objects) = service();
        service.update(42, kursi(), Some(jpeg("x.jpg"))).await.unwrap();
        assert!(store.snapshot().is_empty());
        // The upload happens before the row is looked up
        assert_eq!(objects.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent_and_keeps_object() {
        let (service, store, objects) = service();
        let id = service.create(kursi(), jpeg("kursi.jpg")).await.unwrap();

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();

        assert!(store.snapshot().is_empty());
        assert_eq!(objects.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_upload_writes_no_row() {
        let store = Arc::new(MemoryProductStore::new());
        let service = ProductService::new(
            store.clone(),
            Arc::new(MemoryObjectStore::failing()),
            "products",
        );

        let err = service.create(kursi(), jpeg("kursi.jpg")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
        assert_eq!(store.count().await.unwrap(), 0);
    }
}
