//! Handlers that write the current ARC's status back to the workflow
//! tracker.

use axum::extract::State;
use axum::Json;
use palp_core::tracker::{done_stamp, TrackerColumn, NO_ART_MARKER, UNKNOWN_ART_MARKER};
use palp_db::models::preq::ImageSource;
use palp_db::repositories::PreqRepo;
use palp_external::ValueInput;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireResearcher;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace;

/// The cell that was written and its new value.
#[derive(Debug, Serialize)]
pub struct TrackerUpdate {
    pub arc: String,
    pub cell: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct DoneRequest {
    /// `PinP_preq` or `PPM_preq`.
    pub source: String,
    /// Id of the hero image within that table.
    pub hero: String,
}

async fn write_art_status(
    state: &AppState,
    session_id: &str,
    marker: &str,
) -> AppResult<TrackerUpdate> {
    let current = workspace::current_arc(state, session_id).await?;
    let cell = workspace::write_tracker(
        state,
        TrackerColumn::ArtStatus,
        current.entry.row_index,
        marker,
        ValueInput::Raw,
    )
    .await?;
    Ok(TrackerUpdate {
        arc: current.entry.arc,
        cell,
        value: marker.to_string(),
    })
}

/// POST /api/v1/workspace/tracker/no-art
pub async fn mark_no_art(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<TrackerUpdate>>> {
    let update = write_art_status(&state, &researcher.session_id, NO_ART_MARKER).await?;
    Ok(Json(DataResponse { data: update }))
}

/// POST /api/v1/workspace/tracker/unknown-art
pub async fn mark_unknown_art(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<TrackerUpdate>>> {
    let update = write_art_status(&state, &researcher.session_id, UNKNOWN_ART_MARKER).await?;
    Ok(Json(DataResponse { data: update }))
}

/// POST /api/v1/workspace/done
///
/// Record the hero image, then stamp today's date in the tracker's done
/// column.
pub async fn mark_done(
    State(state): State<AppState>,
    researcher: RequireResearcher,
    Json(input): Json<DoneRequest>,
) -> AppResult<Json<DataResponse<TrackerUpdate>>> {
    let source = ImageSource::from_form_value(&input.source)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown image table '{}'", input.source)))?;
    let hero = input.hero.trim();
    if hero.is_empty() {
        return Err(AppError::BadRequest("A hero image is required".into()));
    }

    let current = workspace::current_arc(&state, &researcher.session_id).await?;
    let today = workspace::today();
    PreqRepo::mark_hero(&state.pool, source, hero, today).await?;

    let value = done_stamp(today);
    let cell = workspace::write_tracker(
        &state,
        TrackerColumn::Done,
        current.entry.row_index,
        &value,
        ValueInput::Raw,
    )
    .await?;
    tracing::info!(arc = %current.entry.arc, ?source, hero, "ARC marked done");

    Ok(Json(DataResponse {
        data: TrackerUpdate {
            arc: current.entry.arc,
            cell,
            value,
        },
    }))
}
