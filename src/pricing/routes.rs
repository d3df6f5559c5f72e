//! Pricing route handlers

use axum::{body::Bytes, extract::State, routing::post, Json, Router};

use super::requests::EstimateRequest;
use super::responses::EstimateResponse;
use crate::error::Result;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/estimate", post(estimate))
}

/// Quote a berth stay.
///
/// The body is parsed leniently so malformed input surfaces as a soft
/// failure instead of an extractor rejection.
pub async fn estimate(State(state): State<AppState>, body: Bytes) -> Result<Json<EstimateResponse>> {
    let input = EstimateRequest::from_body(&body).validate()?;

    let quote = state.engine.get_final_quote(
        input.length,
        input.beam,
        input.days,
        input.vessel_type,
        input.stay_type,
    )?;

    tracing::info!(
        length = %input.length,
        days = input.days,
        vessel_type = %input.vessel_type,
        total = %quote.total_with_vat,
        "Estimate served"
    );

    Ok(Json(EstimateResponse::new(quote)))
}
