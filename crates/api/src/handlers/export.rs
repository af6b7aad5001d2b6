//! CSV download endpoints.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use briq_core::export::dataset_to_csv_bytes;

use crate::error::AppResult;
use crate::state::AppState;

fn csv_attachment(filename: &str, bytes: Vec<u8>) -> Response {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/csv")
        .header(
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(bytes))
        .unwrap()
        .into_response()
}

/// GET /sessions/{id}/export/annotations
///
/// The annotation log as CSV, in creation order.
pub async fn export_annotations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let handle = state.sessions.get(id).await?;
    let bytes = {
        let session = handle.lock().await;
        session.log().to_csv_bytes()?
    };
    Ok(csv_attachment("annotations.csv", bytes))
}

/// GET /sessions/{id}/export/data
///
/// The full dataset as CSV: original columns plus derived elapsed
/// seconds, segment index, and stamped identifier/note columns.
pub async fn export_data(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let handle = state.sessions.get(id).await?;
    let bytes = {
        let session = handle.lock().await;
        dataset_to_csv_bytes(session.dataset())?
    };
    Ok(csv_attachment("data_with_briq_ids.csv", bytes))
}
