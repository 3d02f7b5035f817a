//! Spreadsheet export of the product table

use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use thiserror::Error;

use crate::domain::Product;

pub const EXPORT_FILE_NAME: &str = "products.xlsx";
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SHEET_NAME: &str = "Products";

/// Header row, one column per product field
pub const COLUMNS: [&str; 5] = ["id", "name", "catalog", "price", "image_url"];

#[derive(Debug, Error)]
#[error("Spreadsheet error: {0}")]
pub struct ExportError(#[from] XlsxError);

/// A single worksheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
}

/// Rows of the export in column order, without the header
pub fn product_rows(products: &[Product]) -> Vec<[Cell; 5]> {
    products
        .iter()
        .map(|p| {
            [
                Cell::Number(f64::from(p.id)),
                Cell::Text(p.name.clone()),
                Cell::Text(p.catalog.to_string()),
                Cell::Number(p.price.to_f64().unwrap_or_default()),
                Cell::Text(p.image_url.clone()),
            ]
        })
        .collect()
}

/// Build an in-memory `.xlsx` workbook with a header row and one row per product
pub fn to_xlsx(products: &[Product]) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, header) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (i, row) in product_rows(products).iter().enumerate() {
        let r = i as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                Cell::Number(n) => sheet.write_number(r, col as u16, *n)?,
                Cell::Text(s) => sheet.write_string(r, col as u16, s)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}
