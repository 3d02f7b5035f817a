//! HTML rendering for the product list page

use rust_decimal::Decimal;
use serde::Serialize;
use tera::{Context, Tera};
use thiserror::Error;

use crate::domain::{Catalog, Product};

const INDEX_TEMPLATE: &str = "index.html";

#[derive(Debug, Error)]
#[error("Template error: {0}")]
pub struct ViewError(#[from] tera::Error);

/// Product row as shown on the page
#[derive(Debug, Serialize)]
struct ProductRow<'a> {
    id: i32,
    name: &'a str,
    catalog: &'a str,
    price: String,
    image_url: &'a str,
}

/// Compiled page templates
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Templates are compiled into the binary
    pub fn new() -> Result<Self, ViewError> {
        let mut tera = Tera::default();
        tera.add_raw_template(INDEX_TEMPLATE, include_str!("../../views/index.html"))?;
        Ok(Self { tera })
    }

    /// Render the product list with an optional flash message
    pub fn render_index(
        &self,
        products: &[Product],
        msg: &str,
        server_ip: Option<&str>,
    ) -> Result<String, ViewError> {
        let rows: Vec<ProductRow<'_>> = products
            .iter()
            .map(|p| ProductRow {
                id: p.id,
                name: &p.name,
                catalog: p.catalog.as_str(),
                price: format_price(p.price),
                image_url: &p.image_url,
            })
            .collect();
        let catalogs: Vec<&str> = Catalog::ALL.iter().map(|c| c.as_str()).collect();

        let mut context = Context::new();
        context.insert("products", &rows);
        context.insert("msg", msg);
        context.insert("ip", &server_ip);
        context.insert("catalogs", &catalogs);

        Ok(self.tera.render(INDEX_TEMPLATE, &context)?)
    }
}

/// Drop trailing zero cents: 250000.00 -> 250000, 15000.50 -> 15000.5
fn format_price(price: Decimal) -> String {
    price.normalize().to_string()
}
