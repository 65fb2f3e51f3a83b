//! Route definitions for the researcher workspace.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{associated, descriptions, ppp, tracker, workspace};
use crate::state::AppState;

/// Routes mounted at `/workspace`. All require a researcher token.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/location", put(workspace::set_location))
        .route("/arcs", get(workspace::list_arcs))
        .route("/current-arc", put(workspace::set_current_arc))
        .route("/ppp", get(ppp::list_ppp).post(ppp::update_ppp))
        .route("/carryover", post(ppp::carryover))
        .route("/associated", get(associated::list_associated))
        .route("/descriptions", get(descriptions::show_descriptions))
        .route("/tracker/no-art", post(tracker::mark_no_art))
        .route("/tracker/unknown-art", post(tracker::mark_unknown_art))
        .route("/done", post(tracker::mark_done))
}
