//! # Marina quote service
//!
//! Small HTTP service for a marina's booking automation:
//!
//! - **pricing**: berth quote engine (`POST /estimate`)
//! - **extraction**: intent and field extraction from customer messages
//!   (`POST /extract`)
//! - **routes**: liveness probe (`GET /healthz`)
//!
//! Failures are reported as `{"ok": false, "error": ...}` with HTTP 200.

pub mod auth;
pub mod config;
pub mod error;
pub mod extraction;
pub mod pricing;
pub mod routes;

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::Config;
pub use extraction::MessageExtractor;
pub use pricing::{RateEngine, RateTable};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RateEngine>,
    pub extractor: Arc<MessageExtractor>,
    /// Expected `X-API-Key`; `None` disables the check
    pub api_key: Option<Arc<str>>,
}

impl AppState {
    pub fn new(engine: RateEngine, extractor: MessageExtractor, api_key: Option<String>) -> Self {
        Self {
            engine: Arc::new(engine),
            extractor: Arc::new(extractor),
            api_key: api_key.map(Arc::from),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(pricing::router())
        .merge(extraction::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/healthz", get(routes::health::healthz))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
