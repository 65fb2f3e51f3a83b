//! Handlers for choosing a location and an ARC.

use axum::extract::State;
use axum::Json;
use palp_core::error::CoreError;
use palp_core::location::Location;
use palp_core::tracker::TrackerEntry;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireResearcher, SESSION_ENDED};
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace::{self, ArcSummary};

#[derive(Debug, Serialize)]
pub struct LocationView {
    pub location: Location,
    pub arcs: Vec<ArcSummary>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentArcRequest {
    pub arc: String,
}

/// PUT /api/v1/workspace/location
///
/// Store the location, clear the current ARC and list the tracker rows at
/// the location (image tables not yet consulted).
pub async fn set_location(
    State(state): State<AppState>,
    researcher: RequireResearcher,
    Json(input): Json<Location>,
) -> AppResult<Json<DataResponse<LocationView>>> {
    let location = Location::new(&input.region, &input.insula, &input.property, &input.room);
    if location.region.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Region is required".into(),
        )));
    }

    let entries = workspace::entries_at(&state, &location).await?;
    let session = state
        .sessions
        .set_location(&researcher.session_id, location)
        .await
        .ok_or_else(|| CoreError::Unauthorized(SESSION_ENDED.into()))?;
    tracing::info!(
        region = %session.location.region,
        insula = %session.location.insula,
        property = %session.location.property,
        room = %session.location.room,
        arcs = entries.len(),
        "Location selected",
    );

    Ok(Json(DataResponse {
        data: LocationView {
            location: session.location,
            arcs: entries.into_iter().map(ArcSummary::pending).collect(),
        },
    }))
}

/// GET /api/v1/workspace/arcs
///
/// Every ARC at the location with its reconciled art / plaster flags,
/// notes, images, tracker status and linked PPP entries.
pub async fn list_arcs(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<LocationView>>> {
    let session = workspace::session(&state, &researcher.session_id).await?;
    let location = workspace::require_location(&session)?.clone();

    let entries = workspace::entries_at(&state, &location).await?;
    let arcs = workspace::pull_arcs(&state.pool, entries).await?;

    Ok(Json(DataResponse {
        data: LocationView { location, arcs },
    }))
}

/// PUT /api/v1/workspace/current-arc
pub async fn set_current_arc(
    State(state): State<AppState>,
    researcher: RequireResearcher,
    Json(input): Json<CurrentArcRequest>,
) -> AppResult<Json<DataResponse<TrackerEntry>>> {
    let session = workspace::session(&state, &researcher.session_id).await?;
    let location = workspace::require_location(&session)?;
    let arc = input.arc.trim();

    let entry = workspace::read_tracker(&state)
        .await?
        .find(location, arc)
        .ok_or_else(|| CoreError::NotFound {
            entity: "ARC",
            id: arc.to_string(),
        })?;

    state
        .sessions
        .set_current_arc(&researcher.session_id, &entry.arc)
        .await
        .ok_or_else(|| CoreError::Unauthorized(SESSION_ENDED.into()))?;
    tracing::info!(arc = %entry.arc, row = entry.row_index, "ARC selected");

    Ok(Json(DataResponse { data: entry }))
}
