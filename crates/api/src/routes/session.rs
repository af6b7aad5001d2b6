//! Route definitions for upload sessions and everything under them.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{annotation, export, session};
use crate::state::AppState;

/// Session routes mounted at `/sessions`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(session::create_session))
        .route(
            "/{id}",
            get(session::get_session).delete(session::delete_session),
        )
        .route("/{id}/grouping", put(session::update_grouping))
        .route("/{id}/series", get(session::get_series))
        .route(
            "/{id}/annotations",
            post(annotation::create_annotation).get(annotation::list_annotations),
        )
        .route("/{id}/export/annotations", get(export::export_annotations))
        .route("/{id}/export/data", get(export::export_data))
}
