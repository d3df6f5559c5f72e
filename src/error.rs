//! Error handling for the application
//!
//! Every request-level failure is reported as a soft failure: HTTP 200 with
//! `{"ok": false, "error": "..."}`. The automation tool calling this service
//! branches on `ok` and treats transport errors as hard failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::extraction::ExtractionError;
use crate::pricing::requests::InputError;
use crate::pricing::services::PricingError;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Soft-failure body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Unauthorized => tracing::warn!("Rejected request with bad API key"),
            AppError::Input(e) => tracing::info!("Rejected estimate input: {}", e),
            AppError::Pricing(PricingError::RateNotFound {
                effective_length,
                tier,
            }) => {
                tracing::warn!(
                    "No rate for effective length {} in tier {}",
                    effective_length.meters(),
                    tier
                );
            }
            AppError::Extraction(e) => tracing::info!("Rejected extraction input: {}", e),
        }

        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
