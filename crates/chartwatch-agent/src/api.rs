//! HTTP API for the Prometheus scrape endpoint and liveness probe

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use prometheus::{Encoder, TextEncoder};
use tracing::info;

use crate::metrics::VersionStatusMetrics;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<VersionStatusMetrics>,
}

/// Prometheus metrics endpoint
async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();

    if let Err(error) = encoder.encode(&state.metrics.gather(), &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, error.to_string()).into_response();
    }

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
        .into_response()
}

/// Liveness probe; the agent has no degraded states worth reporting
async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: AppState) -> std::io::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "starting metrics server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, create_router(state)).await
}
