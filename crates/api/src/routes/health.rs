use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Whether an OMDb API key is configured. Acquisition fails upstream without one.
    pub omdb_configured: bool,
}

/// GET /health -- service, database, and provider configuration health.
///
/// A missing OMDb key does not degrade the status; reads still work.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = moviesapp_db::health_check(&state.pool).await.is_ok();

    let status = if db_healthy { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        omdb_configured: !state.config.omdb_api_key.is_empty(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
