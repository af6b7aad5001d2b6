//! Handlers for click-to-annotate and annotation listing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use briq_core::annotation::Annotation;
use briq_core::session::AnnotateRequest;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of an accepted annotation.
///
/// `sink_warning` carries the failure reason when the configured sink
/// rejected the copy; the in-memory log entry is unaffected either way.
#[derive(Debug, Serialize)]
pub struct CreateAnnotationResult {
    pub annotation: Annotation,
    pub sink_warning: Option<String>,
}

/// POST /sessions/{id}/annotations
///
/// Resolve the clicked point to its briquette, append to the session
/// log, stamp the segment's rows, and forward a best-effort copy to
/// the sink when one is configured.
pub async fn create_annotation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AnnotateRequest>,
) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.get(id).await?;
    let annotation = {
        let mut session = handle.lock().await;
        session.annotate(input)?
    };

    // Sink failures surface as a warning and never touch the log.
    let mut sink_warning = None;
    if let Some(sink) = &state.sink {
        if let Err(e) = sink.send(&annotation).await {
            tracing::warn!(session_id = %id, error = %e, "Annotation sink send failed");
            sink_warning = Some(e.to_string());
        }
    }

    tracing::info!(
        session_id = %id,
        briquette_id = %annotation.briquette_id,
        briq_idx = annotation.briq_idx,
        signal = %annotation.signal,
        "Annotation saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreateAnnotationResult {
                annotation,
                sink_warning,
            },
        }),
    ))
}

/// GET /sessions/{id}/annotations
///
/// All annotations in creation order.
pub async fn list_annotations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(DataResponse {
        data: session.log().all().to_vec(),
    }))
}
