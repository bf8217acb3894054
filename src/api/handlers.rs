//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, http::header, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;

use super::origin::AllowedOrigins;
use crate::config::Config;
use crate::APP_NAME;

/// Application state shared with handlers.
///
/// Built once at startup; nothing in it changes afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Origin allowlist consulted by the gate.
    pub origins: Arc<AllowedOrigins>,
    /// Credential block served by `/api/config`.
    pub relay: Arc<ConfigRelay>,
    /// Prometheus renderer, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create state from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            origins: Arc::new(config.allowed_origins()),
            relay: Arc::new(ConfigRelay {
                firebase_config: config.firebase(),
            }),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle, enabling `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
    /// Service name.
    pub app: &'static str,
}

/// Realtime database client credentials, in the browser SDK's key names.
///
/// Every field is always serialised; unset values are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    #[serde(rename = "databaseURL")]
    pub database_url: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

/// Config relay response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigRelay {
    pub firebase_config: FirebaseConfig,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        app: APP_NAME,
    })
}

/// Config relay handler - returns the credential block, never partial.
pub async fn config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ConfigRelay::clone(&state.relay))
}

/// Prometheus scrape handler - 404 unless a recorder is attached.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
