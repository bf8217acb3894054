//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{config, health, metrics, AppState};
use super::origin::origin_gate;
use crate::metrics::track_http;

/// Create the API router.
///
/// Layers run outside-in: request tracing, metrics, then the origin gate, so
/// the gate sees every request before any handler and short-circuited
/// preflights are still traced and counted.
pub fn create_router(state: AppState) -> Router {
    let origins = state.origins.clone();

    Router::new()
        // Health endpoint
        .route("/health", get(health))
        // Client configuration
        .route("/api/config", get(config))
        // Prometheus scrape, 404 when metrics are disabled
        .route("/metrics", get(metrics))
        .with_state(state)
        .layer(middleware::from_fn_with_state(origins, origin_gate))
        .layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
}
