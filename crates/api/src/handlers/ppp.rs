//! Handlers for the PPP entries at the chosen location.

use std::collections::{BTreeMap, HashMap};

use axum::extract::State;
use axum::Json;
use palp_core::carryover::parse_selection;
use palp_core::forms::parse_workspace_form;
use palp_core::location::Location;
use palp_db::models::ppp::PppEntry;
use palp_db::repositories::{PppArcRepo, PppRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireResearcher;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace;

#[derive(Debug, Serialize)]
pub struct PppRow {
    #[serde(flatten)]
    pub entry: PppEntry,
    /// English translation of the description.
    pub translation: String,
    /// ARCs the entry is linked to (free text).
    pub arcs: String,
}

#[derive(Debug, Serialize)]
pub struct PppView {
    pub arc: String,
    pub location: Location,
    pub entries: Vec<PppRow>,
    /// Translations of the PPP entries already linked to the ARC.
    pub carryover: String,
}

#[derive(Debug, Serialize)]
pub struct PppUpdated {
    pub updated: usize,
}

#[derive(Debug, Deserialize)]
pub struct CarryoverRequest {
    /// Uuid list such as `[101,102]`.
    pub selection: String,
}

#[derive(Debug, Serialize)]
pub struct LinkedPpps {
    pub arc: String,
    pub ppps: Vec<String>,
}

/// GET /api/v1/workspace/ppp
pub async fn list_ppp(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<PppView>>> {
    let current = workspace::current_arc(&state, &researcher.session_id).await?;
    let location = current.location;
    let room = (!location.room.is_empty()).then_some(location.room.as_str());

    let entries = PppRepo::list_at_location(
        &state.pool,
        &location.region,
        &location.insula,
        &location.property,
        room,
    )
    .await?;

    let uuids: Vec<String> = entries.iter().map(|e| e.uuid.clone()).collect();
    let mut links: HashMap<String, String> = PppArcRepo::links_for(&state.pool, &uuids)
        .await?
        .into_iter()
        .map(|link| (link.uuid, link.arcs))
        .collect();

    let translations = workspace::translate_all(
        &state,
        entries.iter().map(|e| e.description.as_deref().unwrap_or("")),
    )
    .await?;

    let linked = PppArcRepo::uuids_for_arc(&state.pool, &current.entry.arc).await?;
    let carryover = workspace::carryover_ppp(&state, &linked).await?;

    let entries = entries
        .into_iter()
        .zip(translations)
        .map(|(entry, translation)| PppRow {
            arcs: links.remove(&entry.uuid).unwrap_or_default(),
            entry,
            translation,
        })
        .collect();

    Ok(Json(DataResponse {
        data: PppView {
            arc: current.entry.arc,
            location,
            entries,
            carryover,
        },
    }))
}

/// POST /api/v1/workspace/ppp
///
/// Body is a flat map of `{uuid}_{letter}` keys to values.
pub async fn update_ppp(
    State(state): State<AppState>,
    _researcher: RequireResearcher,
    Json(form): Json<BTreeMap<String, String>>,
) -> AppResult<Json<DataResponse<PppUpdated>>> {
    let updates = parse_workspace_form(&form)?;
    PppRepo::apply_workspace_updates(&state.pool, &updates, workspace::today()).await?;
    tracing::info!(entries = updates.len(), "Updated PPP entries");

    Ok(Json(DataResponse {
        data: PppUpdated {
            updated: updates.len(),
        },
    }))
}

/// POST /api/v1/workspace/carryover
///
/// Link the selected PPP entries to the current ARC, replacing their
/// previous links.
pub async fn carryover(
    State(state): State<AppState>,
    researcher: RequireResearcher,
    Json(input): Json<CarryoverRequest>,
) -> AppResult<Json<DataResponse<LinkedPpps>>> {
    let selection = parse_selection(&input.selection);
    if selection.is_empty() {
        return Err(AppError::BadRequest("No PPP entries selected".into()));
    }

    let current = workspace::current_arc(&state, &researcher.session_id).await?;
    let arc = current.entry.arc;
    PppArcRepo::link_all(&state.pool, &selection, &arc, workspace::today()).await?;
    let ppps = PppArcRepo::uuids_for_arc(&state.pool, &arc).await?;
    tracing::info!(arc = %arc, linked = selection.len(), "Carried PPP entries over");

    Ok(Json(DataResponse {
        data: LinkedPpps { arc, ppps },
    }))
}
