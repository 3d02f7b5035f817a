//! API module - HTTP routes and handlers

pub mod handlers;

use actix_web::web;

/// Configure the application routes
///
/// Static files are mounted separately, after these, so `/` stays the list page.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::products::list_products))
        .route("/create", web::post().to(handlers::products::create_product))
        .route("/update/{id}", web::post().to(handlers::products::update_product))
        .route("/delete/{id}", web::get().to(handlers::products::delete_product))
        .route("/export", web::get().to(handlers::export::export_products))
        .route("/health", web::get().to(handlers::health::health_check));
}
