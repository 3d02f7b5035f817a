//! Product entity and the editable subset submitted by forms

use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use super::catalog::{Catalog, ParseCatalogError};

/// Product row as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub catalog: Catalog,
    pub price: Decimal,
    /// Persisted image reference: a public URL, or an object key under the
    /// presigned policy. Resolved to a browser URL before display.
    pub image_url: String,
}

/// Fields replaced wholesale by create and update
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub catalog: Catalog,
    pub price: Decimal,
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("product name is required")]
    EmptyName,
    #[error(transparent)]
    Catalog(#[from] ParseCatalogError),
    #[error("invalid price '{0}'")]
    Price(String),
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, catalog: Catalog, price: Decimal) -> Self {
        Self {
            name: name.into(),
            catalog,
            price,
        }
    }

    /// Build a draft from raw form text
    ///
    /// Prices are kept to two decimal places, matching the column scale.
    /// Negative prices are accepted.
    pub fn parse(name: &str, catalog: &str, price: &str) -> Result<Self, DraftError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DraftError::EmptyName);
        }

        let catalog = catalog.parse::<Catalog>()?;
        let price = Decimal::from_str(price.trim())
            .map_err(|_| DraftError::Price(price.to_string()))?
            .round_dp(2);

        Ok(Self::new(name, catalog, price))
    }
}
