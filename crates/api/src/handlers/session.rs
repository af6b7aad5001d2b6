//! Handlers for the session lifecycle: CSV upload, summary, grouping,
//! plot series, and teardown.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use briq_core::dataset::Dataset;
use briq_core::error::CoreError;
use briq_core::identifier::IdentifierRegistry;
use briq_core::schema::Column;
use briq_core::session::SessionState;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Session overview returned by create, get, and grouping updates.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub row_count: usize,
    pub columns: Vec<Column>,
    /// Names of the plottable numeric signal columns.
    pub signals: Vec<String>,
    /// Full elapsed-time range; `None` when no timestamp parsed.
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
    pub group_size: usize,
    pub annotation_count: usize,
}

fn summarize(id: Uuid, session: &SessionState) -> SessionSummary {
    let bounds = session.dataset().t_bounds();
    SessionSummary {
        id,
        row_count: session.dataset().row_count(),
        columns: session.dataset().columns().to_vec(),
        signals: session.dataset().signal_names().to_vec(),
        t_min: bounds.map(|(lo, _)| lo),
        t_max: bounds.map(|(_, hi)| hi),
        group_size: session.group_size(),
        annotation_count: session.log().len(),
    }
}

// ---------------------------------------------------------------------------
// Create (upload)
// ---------------------------------------------------------------------------

/// Query parameters for session creation.
#[derive(Debug, Deserialize)]
pub struct CreateSessionParams {
    /// Rows per briquette; defaults to the configured group size.
    pub group_size: Option<usize>,
}

/// POST /sessions
///
/// Accept a multipart upload whose first field is the sensor CSV,
/// parse and segment it, and open a new session.
pub async fn create_session(
    State(state): State<AppState>,
    Query(params): Query<CreateSessionParams>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
        .ok_or_else(|| {
            AppError::BadRequest("Multipart upload must contain a file field".to_string())
        })?;

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;

    let dataset = Dataset::from_csv_bytes(&data)?;
    let group_size = params.group_size.unwrap_or(state.config.default_group_size);
    let registry = IdentifierRegistry::for_today(state.config.identifier_config());
    let session = SessionState::new(dataset, group_size, registry)?;

    let summary_rows = session.dataset().row_count();
    let id = state.sessions.insert(session).await;

    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;

    tracing::info!(session_id = %id, rows = summary_rows, group_size, "Session created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: summarize(id, &session),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Summary / teardown
// ---------------------------------------------------------------------------

/// GET /sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    Ok(Json(DataResponse {
        data: summarize(id, &session),
    }))
}

/// DELETE /sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    if !state.sessions.remove(id).await {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Session",
            id: id.to_string(),
        }));
    }
    tracing::info!(session_id = %id, "Session discarded");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Body for the grouping update endpoint.
#[derive(Debug, Deserialize)]
pub struct UpdateGrouping {
    pub group_size: usize,
}

/// PUT /sessions/{id}/grouping
///
/// Re-segment the dataset with a new rows-per-briquette value.
pub async fn update_grouping(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateGrouping>,
) -> AppResult<impl IntoResponse> {
    let handle = state.sessions.get(id).await?;
    let mut session = handle.lock().await;
    session.set_group_size(input.group_size)?;

    tracing::info!(session_id = %id, group_size = input.group_size, "Session re-segmented");

    Ok(Json(DataResponse {
        data: summarize(id, &session),
    }))
}

// ---------------------------------------------------------------------------
// Series
// ---------------------------------------------------------------------------

/// Query parameters for plot data.
#[derive(Debug, Deserialize)]
pub struct SeriesParams {
    /// Comma-separated signal names; at least one is required.
    pub signals: Option<String>,
    pub t_min: Option<f64>,
    pub t_max: Option<f64>,
}

/// GET /sessions/{id}/series
///
/// Plot data for the selected signals over the filtered view.
pub async fn get_series(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SeriesParams>,
) -> AppResult<impl IntoResponse> {
    let signals: Vec<String> = params
        .signals
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let handle = state.sessions.get(id).await?;
    let session = handle.lock().await;
    let traces = session.series(&signals, params.t_min, params.t_max)?;

    Ok(Json(DataResponse { data: traces }))
}
