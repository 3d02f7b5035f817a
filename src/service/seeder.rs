//! First-run demo data
//!
//! Runs once before the server binds. Nothing here is transactional: a crash
//! between an upload and its insert leaves an orphaned object, and since the
//! table is still empty the next start seeds the full set again.

use std::path::{Path, PathBuf};
use rust_decimal::Decimal;
use tracing::info;

use super::products::{ImageUpload, ProductService};
use super::ServiceError;
use crate::domain::{Catalog, ProductDraft};

/// One bundled demo product
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub name: &'static str,
    pub catalog: Catalog,
    pub price: i64,
    /// File name inside the assets directory
    pub image: &'static str,
}

pub const DEMO_PRODUCTS: [SeedProduct; 5] = [
    SeedProduct { name: "Kursi Kayu", catalog: Catalog::Furniture, price: 250_000, image: "dummy1.jpg" },
    SeedProduct { name: "TV LED", catalog: Catalog::Electronic, price: 1_200_000, image: "dummy2.jpg" },
    SeedProduct { name: "Nasi Kotak", catalog: Catalog::Food, price: 15_000, image: "dummy3.jpg" },
    SeedProduct { name: "Kaos Polos", catalog: Catalog::Fashion, price: 50_000, image: "dummy4.jpg" },
    SeedProduct { name: "Meja Kantor", catalog: Catalog::Furniture, price: 700_000, image: "dummy5.jpg" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already had rows
    Skipped { existing: i64 },
    Seeded { inserted: usize },
}

pub struct Seeder<'a> {
    service: &'a ProductService,
    assets_dir: PathBuf,
}

impl<'a> Seeder<'a> {
    pub fn new(service: &'a ProductService, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            service,
            assets_dir: assets_dir.into(),
        }
    }

    /// Seed only when the product table is empty
    pub async fn run(&self) -> Result<SeedOutcome, ServiceError> {
        let existing = self.service.count().await?;
        if existing > 0 {
            info!(existing, "Products present, skipping demo seed");
            return Ok(SeedOutcome::Skipped { existing });
        }

        for product in &DEMO_PRODUCTS {
            let image = read_asset(&self.assets_dir.join(product.image)).await?;
            let draft = ProductDraft::new(product.name, product.catalog, Decimal::from(product.price));
            self.service.create(draft, image).await?;
        }

        info!(inserted = DEMO_PRODUCTS.len(), "Demo products inserted");
        Ok(SeedOutcome::Seeded { inserted: DEMO_PRODUCTS.len() })
    }
}

async fn read_asset(path: &Path) -> Result<ImageUpload, ServiceError> {
    let data = tokio::fs::read(path).await.map_err(|source| ServiceError::SeedAsset {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(ImageUpload {
        file_name,
        content_type: None,
        data,
    })
}
