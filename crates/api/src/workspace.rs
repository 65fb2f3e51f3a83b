//! Workspace service: tracker reads, ARC reconciliation and carry-over
//! text shared by the workspace handlers.

use chrono::NaiveDate;
use futures::future::try_join_all;
use palp_core::carryover::join_with_terminator;
use palp_core::error::CoreError;
use palp_core::flags::{Classification, FlagSummary};
use palp_core::location::Location;
use palp_core::tracker::{TrackerColumn, TrackerColumns, TrackerEntry};
use palp_db::models::preq::ImageSource;
use palp_db::repositories::{PppArcRepo, PppRepo, PreqRepo};
use palp_db::DbPool;
use palp_external::{CatalogImage, ValueInput};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::rbac::SESSION_ENDED;
use crate::session::WorkspaceSession;
use crate::state::AppState;

/// PPP source text is Italian.
const SOURCE_LANGUAGE: &str = "it";
const TARGET_LANGUAGE: &str = "en";

/// One ARC at the chosen location with everything the workspace shows
/// about it.
#[derive(Debug, Clone, Serialize)]
pub struct ArcSummary {
    pub arc: String,
    pub row_index: usize,
    pub link: Option<String>,
    pub done: bool,
    pub no_art: bool,
    pub unknown_art: bool,
    pub is_art: Classification,
    pub is_plaster: Classification,
    pub notes: String,
    pub pinp_images: Vec<String>,
    pub ppm_images: Vec<String>,
    /// PPP entries linked to this ARC.
    pub ppps: Vec<String>,
}

impl ArcSummary {
    /// Tracker state only; image tables not yet consulted.
    pub fn pending(entry: TrackerEntry) -> Self {
        Self {
            arc: entry.arc,
            row_index: entry.row_index,
            link: entry.link,
            done: entry.done,
            no_art: entry.no_art,
            unknown_art: entry.unknown_art,
            is_art: Classification::NotDefined,
            is_plaster: Classification::NotDefined,
            notes: String::new(),
            pinp_images: Vec::new(),
            ppm_images: Vec::new(),
            ppps: Vec::new(),
        }
    }
}

/// The researcher's selected ARC and its current tracker row.
#[derive(Debug, Clone)]
pub struct CurrentArc {
    pub location: Location,
    pub entry: TrackerEntry,
}

/// Dates stored with links and hero images.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// The caller's open session.
pub async fn session(state: &AppState, session_id: &str) -> Result<WorkspaceSession, CoreError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| CoreError::Unauthorized(SESSION_ENDED.into()))
}

pub fn require_location(session: &WorkspaceSession) -> Result<&Location, CoreError> {
    if session.location.region.is_empty() {
        return Err(CoreError::Validation("Choose a location first".into()));
    }
    Ok(&session.location)
}

pub fn require_current_arc(session: &WorkspaceSession) -> Result<&str, CoreError> {
    session
        .current_arc
        .as_deref()
        .ok_or_else(|| CoreError::Validation("Choose an ARC first".into()))
}

pub async fn read_tracker(state: &AppState) -> AppResult<TrackerColumns> {
    let tracker = &state.config.tracker;
    let values = state
        .services
        .sheets
        .get_columns(&tracker.spreadsheet_id, &tracker.range)
        .await?;
    Ok(TrackerColumns::from_columns(values))
}

pub async fn entries_at(state: &AppState, location: &Location) -> AppResult<Vec<TrackerEntry>> {
    Ok(read_tracker(state).await?.entries_at(location))
}

/// Resolve the session's ARC against a fresh read of the tracker.
pub async fn current_arc(state: &AppState, session_id: &str) -> AppResult<CurrentArc> {
    let session = session(state, session_id).await?;
    let location = require_location(&session)?.clone();
    let arc = require_current_arc(&session)?;

    let entry = read_tracker(state)
        .await?
        .find(&location, arc)
        .ok_or_else(|| CoreError::NotFound {
            entity: "ARC",
            id: arc.to_string(),
        })?;
    Ok(CurrentArc { location, entry })
}

/// Fold the PinP and PPM classification rows of one ARC and collect its
/// linked PPP entries.
pub async fn pull_arc(pool: &DbPool, entry: TrackerEntry) -> Result<ArcSummary, sqlx::Error> {
    let pinp = PreqRepo::rows_for_arc(pool, ImageSource::Pinp, &entry.arc).await?;
    let ppm = PreqRepo::rows_for_arc(pool, ImageSource::Ppm, &entry.arc).await?;

    let mut flags = FlagSummary::default();
    for row in pinp.iter().chain(ppm.iter()) {
        flags.absorb(
            row.is_art.as_deref(),
            row.is_plaster.as_deref(),
            row.notes.as_deref(),
        );
    }
    let ppps = PppArcRepo::uuids_for_arc(pool, &entry.arc).await?;

    let mut summary = ArcSummary::pending(entry);
    summary.is_art = Classification::Known(flags.is_art);
    summary.is_plaster = Classification::Known(flags.is_plaster);
    summary.notes = flags.notes;
    summary.pinp_images = pinp.into_iter().map(|r| r.image_id).collect();
    summary.ppm_images = ppm.into_iter().map(|r| r.image_id).collect();
    summary.ppps = ppps;
    Ok(summary)
}

pub async fn pull_arcs(
    pool: &DbPool,
    entries: Vec<TrackerEntry>,
) -> Result<Vec<ArcSummary>, sqlx::Error> {
    try_join_all(entries.into_iter().map(|entry| pull_arc(pool, entry))).await
}

/// Write one tracker cell for the entry at `row_index` and return its A1
/// reference.
pub async fn write_tracker(
    state: &AppState,
    column: TrackerColumn,
    row_index: usize,
    value: &str,
    input: ValueInput,
) -> AppResult<String> {
    let cell = state.config.tracker_layout.cell(column, row_index);
    state
        .services
        .sheets
        .update_cell(&state.config.tracker.spreadsheet_id, &cell, value, input)
        .await?;
    tracing::info!(cell = %cell, value, "Updated tracker");
    Ok(cell)
}

/// English rendering of Italian PPP text.
pub async fn translate_ppp(state: &AppState, text: &str) -> AppResult<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(state
        .services
        .translator
        .translate(text, SOURCE_LANGUAGE, TARGET_LANGUAGE)
        .await?)
}

/// Translations of several PPP texts, in order.
pub async fn translate_all<'a, I>(state: &AppState, texts: I) -> AppResult<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    try_join_all(texts.into_iter().map(|text| translate_ppp(state, text))).await
}

/// Translated descriptions of the given PPP entries, each terminated by
/// `"; "`.
pub async fn carryover_ppp(state: &AppState, uuids: &[String]) -> AppResult<String> {
    let descriptions = PppRepo::descriptions_for(&state.pool, uuids).await?;
    let translations = translate_all(
        state,
        descriptions
            .iter()
            .map(|d| d.description.as_deref().unwrap_or("")),
    )
    .await?;
    Ok(join_with_terminator(translations))
}

/// First image-catalog hit for a file name. Lookup failures degrade to
/// `None`.
pub async fn first_catalog_image(state: &AppState, filename: &str) -> Option<CatalogImage> {
    match state.services.catalog.search_filename(filename).await {
        Ok(images) => images.into_iter().next(),
        Err(err) => {
            tracing::warn!(filename, error = %err, "Image catalog lookup failed");
            None
        }
    }
}
