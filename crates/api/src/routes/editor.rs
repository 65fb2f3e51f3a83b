//! Route definitions for the single-entry editors.

use axum::routing::get;
use axum::Router;

use crate::handlers::{editor_ppm, editor_ppp};
use crate::state::AppState;

/// Routes mounted at `/editor`. All require an editor token.
///
/// ```text
/// GET  /ppp         -> get_ppp
/// POST /ppp         -> update_ppp
/// GET  /ppm         -> get_ppm
/// POST /ppm         -> update_ppm
/// GET  /ppm/search  -> search_ppm
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ppp", get(editor_ppp::get_ppp).post(editor_ppp::update_ppp))
        .route("/ppm", get(editor_ppm::get_ppm).post(editor_ppm::update_ppm))
        .route("/ppm/search", get(editor_ppm::search_ppm))
}
