//! HTTP-facing error type
//!
//! Malformed form input maps to 400. Everything else is a generic 500; the
//! cause goes to the log, never to the client.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;
use tracing::error;

use crate::domain::DraftError;
use crate::export::ExportError;
use crate::service::ServiceError;
use crate::views::ViewError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    View(#[from] ViewError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::InvalidInput(msg) => HttpResponse::build(status).body(msg.clone()),
            _ => {
                error!(error = %self, "Request failed");
                HttpResponse::build(status).body("Internal Server Error")
            }
        }
    }
}
