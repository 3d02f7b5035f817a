//! Database queries for products

use async_trait::async_trait;
use tokio_postgres::Row;
use tracing::{debug, info, instrument};

use super::pool::{DbError, DbPool};
use super::store::ProductStore;
use crate::domain::{Catalog, Product, ProductDraft};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        catalog VARCHAR(16) NOT NULL
            CHECK (catalog IN ('furniture', 'electronic', 'food', 'fashion')),
        price NUMERIC(10, 2) NOT NULL,
        image_url TEXT NOT NULL
    )
"#;

/// Repository for product database operations
#[derive(Clone)]
pub struct ProductRepository {
    pool: DbPool,
}

impl ProductRepository {
    /// Create a new product repository
    pub fn new(pool: DbPool) -> Self {
        ProductRepository { pool }
    }
}

fn product_from_row(row: &Row) -> Result<Product, DbError> {
    let catalog: String = row.get("catalog");
    let catalog = catalog
        .parse::<Catalog>()
        .map_err(|e| DbError::InvalidRow(e.to_string()))?;

    Ok(Product {
        id: row.get("id"),
        name: row.get("name"),
        catalog,
        price: row.get("price"),
        image_url: row.get("image_url"),
    })
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn ensure_schema(&self) -> Result<(), DbError> {
        let client = self.pool.get().await?;
        client.batch_execute(CREATE_TABLE).await?;
        info!("Product table ready");
        Ok(())
    }

    async fn count(&self) -> Result<i64, DbError> {
        let client = self.pool.get().await?;
        let row = client.query_one("SELECT COUNT(*) AS count FROM products", &[]).await?;
        Ok(row.get("count"))
    }

    async fn list(&self) -> Result<Vec<Product>, DbError> {
        let client = self.pool.get().await?;

        let rows = client.query(
            "SELECT id, name, catalog, price, image_url FROM products ORDER BY id",
            &[]
        ).await?;

        let products = rows.iter().map(product_from_row).collect::<Result<Vec<_>, _>>()?;
        debug!("Loaded {} products from database", products.len());
        Ok(products)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn insert(&self, draft: &ProductDraft, image_ref: &str) -> Result<i32, DbError> {
        let client = self.pool.get().await?;

        let row = client.query_one(
            r#"
            INSERT INTO products (name, catalog, price, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
            &[&draft.name, &draft.catalog.as_str(), &draft.price, &image_ref]
        ).await?;

        let id: i32 = row.get("id");
        info!(product_id = id, catalog = %draft.catalog, "Inserted product");
        Ok(id)
    }

    #[instrument(skip(self, draft), fields(name = %draft.name))]
    async fn update(
        &self,
        id: i32,
        draft: &ProductDraft,
        image_ref: Option<&str>,
    ) -> Result<u64, DbError> {
        let client = self.pool.get().await?;

        let touched = match image_ref {
            Some(image_ref) => {
                client.execute(
                    "UPDATE products SET name = $1, catalog = $2, price = $3, image_url = $4 WHERE id = $5",
                    &[&draft.name, &draft.catalog.as_str(), &draft.price, &image_ref, &id]
                ).await?
            }
            None => {
                client.execute(
                    "UPDATE products SET name = $1, catalog = $2, price = $3 WHERE id = $4",
                    &[&draft.name, &draft.catalog.as_str(), &draft.price, &id]
                ).await?
            }
        };

        info!(product_id = id, rows = touched, image_replaced = image_ref.is_some(), "Updated product");
        Ok(touched)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let client = self.pool.get().await?;
        let removed = client.execute("DELETE FROM products WHERE id = $1", &[&id]).await?;
        info!(product_id = id, rows = removed, "Deleted product");
        Ok(removed)
    }
}
