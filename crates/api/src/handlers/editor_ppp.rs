//! Single-entry PPP editor.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use palp_core::forms::{editor_fields, PppField};
use palp_core::ids::next_ppp_uuid;
use palp_db::models::ppp::PppRecord;
use palp_db::repositories::PppRepo;
use serde::{Deserialize, Serialize};

use super::{missing_entry, non_blank};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;

const USAGE: &str = "Please put a query in the URL using the format /editor/ppp?id= or /editor/ppp?uuid=";

#[derive(Debug, Deserialize)]
pub struct PppLookup {
    pub uuid: Option<String>,
    pub id: Option<String>,
}

/// Outcome of a single-entry save.
#[derive(Debug, Serialize)]
pub struct EditResult {
    pub uuid: String,
    /// The entry to edit next; `None` for newly created entries.
    pub next: Option<String>,
}

/// GET /api/v1/editor/ppp?uuid=|id=
///
/// `uuid` takes precedence when both are given.
pub async fn get_ppp(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Query(params): Query<PppLookup>,
) -> AppResult<Json<DataResponse<Vec<PppRecord>>>> {
    let records = if let Some(uuid) = non_blank(&params.uuid) {
        let records = PppRepo::find_by_uuid(&state.pool, uuid).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(missing_entry("Unique ID", uuid)));
        }
        records
    } else if let Some(id) = non_blank(&params.id) {
        let records = PppRepo::find_by_ppp_id(&state.pool, id).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(missing_entry("PPPID", id)));
        }
        records
    } else {
        return Err(AppError::BadRequest(USAGE.into()));
    };

    Ok(Json(DataResponse { data: records }))
}

/// POST /api/v1/editor/ppp
///
/// Body holds `uuid` plus any of the named editor fields. The entry is
/// created if it does not exist yet.
pub async fn update_ppp(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Json(form): Json<BTreeMap<String, String>>,
) -> AppResult<Json<DataResponse<EditResult>>> {
    let uuid = form
        .get("uuid")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("uuid is required".into()))?;

    let fields = editor_fields(&form, PppField::from_editor_key);
    PppRepo::apply_fields(&state.pool, &uuid, &fields).await?;
    tracing::info!(uuid = %uuid, fields = fields.len(), "Saved PPP entry");

    Ok(Json(DataResponse {
        data: EditResult {
            next: next_ppp_uuid(&uuid),
            uuid,
        },
    }))
}
