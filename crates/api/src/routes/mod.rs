pub mod health;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /sessions                              create (POST)
/// /sessions/{id}                         summary (GET), discard (DELETE)
/// /sessions/{id}/grouping                re-segment (PUT)
/// /sessions/{id}/series                  plot data (GET)
/// /sessions/{id}/annotations             annotate (POST), list (GET)
/// /sessions/{id}/export/annotations      annotations CSV (GET)
/// /sessions/{id}/export/data             full data CSV (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/sessions", session::router())
}
