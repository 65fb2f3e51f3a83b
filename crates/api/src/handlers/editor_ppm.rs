//! Single-entry PPM editor and location search.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use palp_core::forms::{editor_fields, PpmField};
use palp_core::ids::next_ppm_id;
use palp_core::location::Location;
use palp_db::models::ppm::PpmRecord;
use palp_db::repositories::PpmRepo;
use serde::{Deserialize, Serialize};

use super::editor_ppp::EditResult;
use super::{missing_entry, non_blank};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireEditor;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace;

const USAGE: &str =
    "Please put a query in the URL using the format /editor/ppm?uuid= or /editor/ppm?location=";

#[derive(Debug, Deserialize)]
pub struct PpmLookup {
    pub uuid: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PpmHit {
    pub id: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
    /// `image_path` split on `_` (volume, page, plate...).
    pub path_parts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PpmSearchResult {
    /// Search terms as entered.
    pub location: Location,
    /// `false` when no location field was filled in.
    pub searched: bool,
    pub results: Vec<PpmHit>,
}

#[derive(Debug, Serialize)]
pub struct PpmEntry {
    #[serde(flatten)]
    pub record: PpmRecord,
    /// Medium-size catalog rendition.
    pub image_url: Option<String>,
}

/// GET /api/v1/editor/ppm/search?region=&insula=&property=&room=
///
/// Regions are matched as Roman numerals and the other parts without
/// leading zeros.
pub async fn search_ppm(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Query(params): Query<Location>,
) -> AppResult<Json<DataResponse<PpmSearchResult>>> {
    let location = Location::new(&params.region, &params.insula, &params.property, &params.room);
    let Some(patterns) = location.ppm_search_patterns() else {
        return Ok(Json(DataResponse {
            data: PpmSearchResult {
                location,
                searched: false,
                results: Vec::new(),
            },
        }));
    };

    let results = PpmRepo::search(&state.pool, &patterns)
        .await?
        .into_iter()
        .map(|row| PpmHit {
            path_parts: row
                .image_path
                .as_deref()
                .map(|p| p.split('_').map(str::to_string).collect())
                .unwrap_or_default(),
            id: row.id,
            description: row.description,
            image_path: row.image_path,
        })
        .collect();

    Ok(Json(DataResponse {
        data: PpmSearchResult {
            location,
            searched: true,
            results,
        },
    }))
}

/// GET /api/v1/editor/ppm?uuid=|location=
pub async fn get_ppm(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Query(params): Query<PpmLookup>,
) -> AppResult<Json<DataResponse<Vec<PpmEntry>>>> {
    let records = if let Some(uuid) = non_blank(&params.uuid) {
        let records = PpmRepo::find_by_id(&state.pool, uuid).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(missing_entry("Unique ID", uuid)));
        }
        records
    } else if let Some(location) = non_blank(&params.location) {
        let records = PpmRepo::find_by_location(&state.pool, location).await?;
        if records.is_empty() {
            return Err(AppError::NotFound(missing_entry(
                "PPM photo archive id",
                location,
            )));
        }
        records
    } else {
        return Err(AppError::BadRequest(USAGE.into()));
    };

    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let image_url = workspace::first_catalog_image(&state, &record.id)
            .await
            .and_then(|hit| hit.url_size2);
        entries.push(PpmEntry { record, image_url });
    }

    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/editor/ppm
pub async fn update_ppm(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Json(form): Json<BTreeMap<String, String>>,
) -> AppResult<Json<DataResponse<EditResult>>> {
    let id = form
        .get("uuid")
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::BadRequest("uuid is required".into()))?;

    let fields = editor_fields(&form, PpmField::from_editor_key);
    PpmRepo::apply_fields(&state.pool, &id, &fields).await?;
    tracing::info!(ppm_id = %id, fields = fields.len(), "Saved PPM entry");

    Ok(Json(DataResponse {
        data: EditResult {
            next: next_ppm_id(&id),
            uuid: id,
        },
    }))
}
