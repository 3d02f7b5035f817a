//! Health check endpoint

use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Row count, absent when the database is unreachable
    pub products: Option<i64>,
}

/// GET /health - Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    match state.products.count().await {
        Ok(count) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            products: Some(count),
        }),
        Err(e) => {
            warn!(error = %e, "Health check could not reach the database");
            HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy",
                version: env!("CARGO_PKG_VERSION"),
                products: None,
            })
        }
    }
}
