//! Rows of the `pinp_preq` / `ppm_preq` classification tables.

use serde::Serialize;
use sqlx::FromRow;

/// Which image table a classification row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Pinp,
    Ppm,
}

impl ImageSource {
    /// Accepts the table names used by the workspace forms (`PinP_preq`,
    /// `PPM_preq`) as well as the bare source names.
    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pinp_preq" | "pinp" => Some(ImageSource::Pinp),
            "ppm_preq" | "ppm" => Some(ImageSource::Ppm),
            _ => None,
        }
    }
}

/// One image classified against an ARC.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PreqRow {
    pub image_id: String,
    pub is_art: Option<String>,
    pub is_plaster: Option<String>,
    pub notes: Option<String>,
}
