//! PinP image metadata.

use serde::Serialize;
use sqlx::FromRow;

/// Archive id and caption of a PinP photograph.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PinpCaption {
    pub archive_id: String,
    pub img_alt: Option<String>,
}
