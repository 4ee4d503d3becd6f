//! HTTP surface: routing, request validation, and error mapping.
//!
//! Thin plumbing around the scoring core. Routes mirror the service's API:
//! a strict-validated single-record endpoint, two batch endpoints (CSV and
//! simulated), analytics over stored counts, a results listing, and raw log
//! upload.

pub mod error;
pub mod handlers;
pub mod validate;

pub use error::ApiError;

use crate::config::SimulationConfig;
use crate::scoring::SessionScorer;
use crate::storage::ResultStore;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state: the scorer's model handles, the result store,
/// and the simulation defaults.
#[derive(Clone)]
pub struct AppState {
    pub scorer: SessionScorer,
    pub store: Arc<ResultStore>,
    pub simulation: SimulationConfig,
}

/// Build the service router with CORS and request tracing layers.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/predict-csv", post(handlers::predict_csv::predict_csv))
        .route(
            "/api/analyze-website",
            post(handlers::analyze::analyze_website),
        )
        .route("/api/analytics", get(handlers::analytics::analytics))
        .route("/api/results", get(handlers::results::list))
        .route("/api/logs", post(handlers::logs::upload))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
