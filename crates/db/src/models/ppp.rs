//! PPP entry models.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A PPP entry as listed on the workspace page for a location.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PppEntry {
    pub uuid: String,
    /// Italian source text.
    pub description: Option<String>,
    pub ppp_id: Option<String>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub room: Option<String>,
}

/// A full PPP entry as shown in the single-entry editor.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PppRecord {
    pub uuid: String,
    pub ppp_id: Option<String>,
    pub location: Option<String>,
    pub material: Option<String>,
    pub description: Option<String>,
    pub condition_ppp: Option<String>,
    pub style: Option<String>,
    pub bibliography: Option<String>,
    pub photo_negative: Option<String>,
}

/// The description of one PPP entry, for carry-over text.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PppDescription {
    pub uuid: String,
    pub description: Option<String>,
    pub reviewed: bool,
}

/// A row of `ppp_desc`: the ARCs an entry was linked to.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PppArcLink {
    pub uuid: String,
    pub arcs: String,
    pub date_added: Option<NaiveDate>,
}
