//! PPM image metadata.

use serde::Serialize;
use sqlx::FromRow;

/// A full PPM row as shown in the single-entry editor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PpmRecord {
    pub id: String,
    pub photo_archive_id: Option<String>,
    pub description: Option<String>,
    pub translated_text: Option<String>,
    pub image_path: Option<String>,
    pub region: Option<String>,
    pub insula: Option<String>,
    pub doorway: Option<String>,
    pub doorways: Option<String>,
    pub room: Option<String>,
    pub other_location: Option<String>,
    pub volume: Option<String>,
    pub page: Option<String>,
    pub caption: Option<String>,
}

/// A PPM location search hit.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PpmSearchRow {
    pub id: String,
    pub description: Option<String>,
    pub image_path: Option<String>,
}

/// Id and English translation of a PPM image's text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PpmCaption {
    pub id: String,
    pub translated_text: Option<String>,
}
