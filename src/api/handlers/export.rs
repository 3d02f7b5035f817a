//! Spreadsheet download endpoint

use actix_web::{http::header, web, HttpResponse};
use tracing::info;

use crate::error::AppError;
use crate::export::{self, EXPORT_FILE_NAME, XLSX_CONTENT_TYPE};
use crate::AppState;

/// GET /export - Download every product as `products.xlsx`
pub async fn export_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = state.products.list().await?;
    let count = products.len();

    let workbook = web::block(move || export::to_xlsx(&products))
        .await
        .map_err(|e| AppError::Io(std::io::Error::other(e.to_string())))??;

    info!(rows = count, bytes = workbook.len(), "Exported products");

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", EXPORT_FILE_NAME),
        ))
        .body(workbook))
}
