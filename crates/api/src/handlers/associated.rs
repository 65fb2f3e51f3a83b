//! Images classified against the current ARC.
//!
//! PinP photographs are looked up in the Luna catalog; PPM scans live in
//! Box and get a thumbnail cached on local disk the first time they are
//! shown.

use std::path::PathBuf;

use axum::extract::State;
use axum::Json;
use palp_db::repositories::{PinpRepo, PpmRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireResearcher;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace;

/// Path prefix under which cached thumbnails are served.
pub const THUMBNAIL_ROUTE: &str = "/static/images";
const THUMBNAIL_MIN_WIDTH: u32 = 200;

#[derive(Debug, Serialize)]
pub struct PinpImage {
    pub archive_id: String,
    pub caption: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Luna record id.
    pub catalog_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PpmImage {
    pub id: String,
    pub caption: Option<String>,
    /// Box link, when the scan was found.
    pub file_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AssociatedView {
    pub arc: String,
    pub pinp: Vec<PinpImage>,
    pub ppm: Vec<PpmImage>,
}

/// GET /api/v1/workspace/associated
pub async fn list_associated(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<AssociatedView>>> {
    let current = workspace::current_arc(&state, &researcher.session_id).await?;
    let summary = workspace::pull_arc(&state.pool, current.entry).await?;

    let mut pinp = Vec::with_capacity(summary.pinp_images.len());
    for archive_id in &summary.pinp_images {
        pinp.push(pinp_image(&state, archive_id).await?);
    }

    let mut ppm = Vec::with_capacity(summary.ppm_images.len());
    for id in &summary.ppm_images {
        ppm.push(ppm_image(&state, id).await?);
    }

    Ok(Json(DataResponse {
        data: AssociatedView {
            arc: summary.arc,
            pinp,
            ppm,
        },
    }))
}

async fn pinp_image(state: &AppState, archive_id: &str) -> AppResult<PinpImage> {
    let caption = PinpRepo::captions(&state.pool, archive_id)
        .await?
        .into_iter()
        .next()
        .and_then(|c| c.img_alt);

    let hit = workspace::first_catalog_image(state, &format!("image{archive_id}.jpg")).await;
    Ok(PinpImage {
        archive_id: archive_id.to_string(),
        caption,
        thumbnail_url: hit.as_ref().and_then(|h| h.url_size1.clone()),
        catalog_id: hit.map(|h| h.id),
    })
}

async fn ppm_image(state: &AppState, id: &str) -> AppResult<PpmImage> {
    let caption = PpmRepo::captions(&state.pool, id)
        .await?
        .into_iter()
        .next()
        .and_then(|c| c.translated_text);

    let file = state
        .services
        .files
        .find_file(&format!("{id}.jpg"), &state.config.box_ppm_folder_id)
        .await?;
    let Some(file) = file else {
        tracing::debug!(ppm_id = id, "No stored scan for PPM image");
        return Ok(PpmImage {
            id: id.to_string(),
            caption,
            file_url: None,
            thumbnail_url: None,
        });
    };

    Ok(PpmImage {
        id: id.to_string(),
        caption,
        file_url: Some(state.services.files.file_url(&file.id)),
        thumbnail_url: cached_thumbnail(state, &file.id).await,
    })
}

/// Serve a cached thumbnail, fetching it on first use. Failures are logged
/// and leave the image without a thumbnail.
async fn cached_thumbnail(state: &AppState, file_id: &str) -> Option<String> {
    let filename = format!("{file_id}.jpg");
    let path: PathBuf = state.config.thumbnail_dir.join(&filename);
    let url = format!("{THUMBNAIL_ROUTE}/{filename}");

    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
        return Some(url);
    }

    let bytes = match state.services.files.thumbnail(file_id, THUMBNAIL_MIN_WIDTH).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            tracing::debug!(file_id, "Thumbnail not ready yet");
            return None;
        }
        Err(err) => {
            tracing::warn!(file_id, error = %err, "Thumbnail fetch failed");
            return None;
        }
    };

    if let Err(err) = tokio::fs::write(&path, &bytes).await {
        tracing::warn!(path = %path.display(), error = %err, "Could not cache thumbnail");
        return None;
    }
    Some(url)
}
