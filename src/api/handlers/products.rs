//! Product list and form handlers
//!
//! Form posts answer with a 302 back to `/` carrying a human-readable `msg`.

use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use actix_web::{http::header, web, HttpResponse};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use tracing::info;

use crate::domain::ProductDraft;
use crate::error::AppError;
use crate::service::ImageUpload;
use crate::AppState;

pub const MSG_IMAGE_REQUIRED: &str = "Gambar wajib diupload";
pub const MSG_CREATED: &str = "Sukses menambahkan data";
pub const MSG_UPDATED: &str = "Data berhasil diupdate";
pub const MSG_DELETED: &str = "Data dihapus";

/// Query string of the list page
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub msg: Option<String>,
}

/// Multipart body shared by create and update
#[derive(MultipartForm)]
pub struct ProductForm {
    pub name: Text<String>,
    pub catalog: Text<String>,
    pub price: Text<String>,
    pub image: Option<TempFile>,
}

/// GET / - Render all products
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, AppError> {
    let products = state.products.list().await?;
    let html = state.views.render_index(
        &products,
        query.msg.as_deref().unwrap_or(""),
        state.server_ip.as_deref(),
    )?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

/// POST /create - Add a product; the image is mandatory
pub async fn create_product(
    state: web::Data<AppState>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> Result<HttpResponse, AppError> {
    let Some(file) = form.image.filter(has_content) else {
        info!("Create rejected: no image uploaded");
        return Ok(redirect_with_message(MSG_IMAGE_REQUIRED));
    };

    let draft = ProductDraft::parse(&form.name, &form.catalog, &form.price)?;
    let image = read_upload(file).await?;
    let id = state.products.create(draft, image).await?;

    info!(product_id = id, "Product created via form");
    Ok(redirect_with_message(MSG_CREATED))
}

/// POST /update/{id} - Replace fields; the image only when a new file is sent
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    let draft = ProductDraft::parse(&form.name, &form.catalog, &form.price)?;

    let image = match form.image.filter(has_content) {
        Some(file) => Some(read_upload(file).await?),
        None => None,
    };

    state.products.update(id, draft, image).await?;
    Ok(redirect_with_message(MSG_UPDATED))
}

/// GET /delete/{id} - Remove the row; unknown ids are ignored
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&path)?;
    state.products.delete(id).await?;
    Ok(redirect_with_message(MSG_DELETED))
}

/// 302 to the list page with a flash message
pub fn redirect_with_message(msg: &str) -> HttpResponse {
    let location = format!("/?msg={}", utf8_percent_encode(msg, NON_ALPHANUMERIC));
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.parse::<i32>()
        .map_err(|_| AppError::InvalidInput(format!("invalid product id '{}'", raw)))
}

/// Browsers send an empty part when the file input is left blank
fn has_content(file: &TempFile) -> bool {
    file.size > 0 && file.file_name.as_deref().is_some_and(|n| !n.is_empty())
}

async fn read_upload(file: TempFile) -> Result<ImageUpload, AppError> {
    let data = tokio::fs::read(file.file.path()).await?;
    Ok(ImageUpload {
        file_name: file.file_name.unwrap_or_default(),
        content_type: file.content_type.map(|m| m.to_string()),
        data,
    })
}
