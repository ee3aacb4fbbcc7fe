//! Health check endpoint.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// "healthy" when the database answers, "degraded" otherwise.
    pub status: &'static str,
    /// Database reachability.
    pub database: &'static str,
    /// Storage backend in use.
    pub storage: &'static str,
    /// Service version.
    pub version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, database) = match state.db.ping().await {
        Ok(()) => ("healthy", "up"),
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            ("degraded", "down")
        }
    };

    Json(HealthResponse {
        status,
        database,
        storage: state.storage.provider_name(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
