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
    /// Whether an annotation sink is configured.
    pub sink_configured: bool,
    /// Sink reachability; `None` when no sink is configured.
    pub sink_healthy: Option<bool>,
    /// Number of live upload sessions.
    pub active_sessions: usize,
}

/// GET /health -- service health plus sink reachability when configured.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sink_healthy = match &state.pool {
        Some(pool) => Some(briq_db::health_check(pool).await.is_ok()),
        None => None,
    };

    // An unreachable sink degrades the service but never fails it;
    // the in-memory annotation log stays the source of truth.
    let status = if sink_healthy == Some(false) {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        sink_configured: state.sink.is_some(),
        sink_healthy,
        active_sessions: state.sessions.count().await,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
