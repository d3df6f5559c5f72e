//! Health check endpoint

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Liveness probe; no auth, no dependencies.
pub async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}
