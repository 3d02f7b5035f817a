//! Catalog Admin
//!
//! Product catalog web admin built on Actix-Web. Products live in PostgreSQL,
//! their images in an S3 bucket; the list page is server-rendered and the
//! whole table can be downloaded as a spreadsheet.

use actix_files::Files;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use std::net::{IpAddr, UdpSocket};
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

mod api;
mod config;
mod db;
mod domain;
mod error;
mod export;
mod service;
mod storage;
mod views;

use crate::config::Settings;
use crate::db::{DbPool, ProductRepository, ProductStore};
use crate::service::{ProductService, Seeder};
use crate::storage::S3Store;
use crate::views::PageRenderer;

/// Application state shared across all handlers
pub struct AppState {
    pub products: ProductService,
    pub views: PageRenderer,
    /// Shown on the list page so operators can tell instances apart
    pub server_ip: Option<String>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("catalog_admin=info".parse()?)
                .add_directive("actix_web=info".parse()?)
        )
        .json()
        .init();

    let settings = Settings::load().context("Failed to load configuration")?;
    let bind_addr = settings.bind_addr();

    info!(
        "Starting Catalog Admin v{} on {}",
        env!("CARGO_PKG_VERSION"),
        bind_addr
    );

    let pool = DbPool::new(&settings.database).context("Failed to create database pool")?;
    pool.test_connection().await.context("Database connection test failed")?;

    let repository = ProductRepository::new(pool);
    repository.ensure_schema().await.context("Failed to create product table")?;

    let objects = S3Store::new(&settings.storage)
        .await
        .context("Failed to initialize S3 client")?;

    let products = ProductService::new(
        Arc::new(repository),
        Arc::new(objects),
        settings.storage.key_prefix.clone(),
    );

    // Demo data goes in before the server accepts connections
    if settings.seed.enabled {
        let outcome = Seeder::new(&products, &settings.seed.assets_dir)
            .run()
            .await
            .context("Failed to seed demo products")?;
        info!(?outcome, "Seeding finished");
    }

    let app_state = web::Data::new(AppState {
        products,
        views: PageRenderer::new().context("Failed to compile page templates")?,
        server_ip: detect_server_ip(),
    });

    let upload_limit = settings.web.upload_limit_bytes;
    let static_dir = settings.web.static_dir.clone();
    let workers = settings.server.workers.unwrap_or_else(|| num_cpus::get() * 2);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(MultipartFormConfig::default().total_limit(upload_limit))
            .wrap(TracingLogger::default())
            .wrap(middleware::Compress::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Service", "catalog-admin"))
                    .add(("X-Version", env!("CARGO_PKG_VERSION")))
            )
            .configure(api::configure_routes)
            .service(Files::new("/", &static_dir))
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await?;

    Ok(())
}

/// Primary non-loopback IPv4 address of this host
///
/// Connecting a UDP socket only selects a route; no packet is sent. The
/// address is the source of the default route, so a host without one (an
/// isolated container or an air-gapped box) gets `None` and the page omits
/// the IP line. Interfaces are not enumerated.
fn detect_server_ip() -> Option<String> {
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_loopback() && !ip.is_unspecified() => Some(ip.to_string()),
        _ => None,
    }
}
