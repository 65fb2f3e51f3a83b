//! The per-ARC description spreadsheet.

use axum::extract::State;
use axum::Json;
use palp_core::carryover::join_captions;
use palp_core::tracker::TrackerColumn;
use palp_db::repositories::{PinpRepo, PpmRepo};
use palp_external::ValueInput;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireResearcher;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::workspace::{self, ArcSummary};

const SHEET_NAME_PREFIX: &str = "Workspace_5_";

#[derive(Debug, Serialize)]
pub struct DescriptionsView {
    pub arc: String,
    pub sheet_url: String,
    /// Whether the sheet was created by this request.
    pub created: bool,
    pub carryover_ppp: String,
    pub carryover_pinp: String,
    pub carryover_ppm: String,
}

pub fn sheet_url(spreadsheet_id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}")
}

/// GET /api/v1/workspace/descriptions
///
/// Creates the description sheet on first visit: copy the template,
/// record the link in the tracker, share it with the editors and hand
/// ownership over. Returns the captions to copy into it.
pub async fn show_descriptions(
    State(state): State<AppState>,
    researcher: RequireResearcher,
) -> AppResult<Json<DataResponse<DescriptionsView>>> {
    let current = workspace::current_arc(&state, &researcher.session_id).await?;
    let summary = workspace::pull_arc(&state.pool, current.entry).await?;

    let (sheet_url, created) = match summary.link.as_deref() {
        Some(link) if link.contains("http") => (link.to_string(), false),
        _ => (create_sheet(&state, &summary).await?, true),
    };

    let mut pinp_captions = Vec::new();
    for archive_id in &summary.pinp_images {
        pinp_captions.extend(
            PinpRepo::captions(&state.pool, archive_id)
                .await?
                .into_iter()
                .filter_map(|c| c.img_alt),
        );
    }
    let mut ppm_captions = Vec::new();
    for id in &summary.ppm_images {
        ppm_captions.extend(
            PpmRepo::captions(&state.pool, id)
                .await?
                .into_iter()
                .filter_map(|c| c.translated_text),
        );
    }
    let carryover_ppp = workspace::carryover_ppp(&state, &summary.ppps).await?;

    Ok(Json(DataResponse {
        data: DescriptionsView {
            arc: summary.arc,
            sheet_url,
            created,
            carryover_ppp,
            carryover_pinp: join_captions(pinp_captions),
            carryover_ppm: join_captions(ppm_captions),
        },
    }))
}

async fn create_sheet(state: &AppState, summary: &ArcSummary) -> AppResult<String> {
    let sheets = &state.config.descriptions;
    let drive = &state.services.drive;

    let new_id = drive
        .copy_file(
            &sheets.template_id,
            &format!("{SHEET_NAME_PREFIX}{}", summary.arc),
            &sheets.folder_id,
        )
        .await?;
    if new_id.is_empty() {
        return Err(AppError::InternalError("Copied sheet has no id".into()));
    }
    let url = sheet_url(&new_id);

    workspace::write_tracker(
        state,
        TrackerColumn::Link,
        summary.row_index,
        &url,
        ValueInput::UserEntered,
    )
    .await?;

    for email in &sheets.editors {
        drive.add_writer(&new_id, email).await?;
    }
    if let Some(owner) = &sheets.owner {
        drive.transfer_ownership(&new_id, owner).await?;
    }

    tracing::info!(arc = %summary.arc, sheet = %new_id, "Created description sheet");
    Ok(url)
}
