//! Domain types and models

pub mod catalog;
pub mod product;

pub use catalog::Catalog;
pub use product::{DraftError, Product, ProductDraft};
