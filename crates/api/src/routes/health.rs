use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use vitrine_core::types::Scope;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the slide store is reachable.
    pub store_healthy: bool,
}

/// GET /health -- returns service and store health.
///
/// The probe is a side-effect-free listing of an empty scope, which
/// exercises the backing store's read path.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let probe = Scope::new("_health", "_health");
    let store_healthy = state.engine.list(&probe, false).await.is_ok();

    let status = if store_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        store_healthy,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
