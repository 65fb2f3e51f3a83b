pub mod auth;
pub mod editor;
pub mod health;
pub mod vocabulary;
pub mod workspace;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                         researcher login (public)
/// /auth/editor-login                  editor login (public)
/// /auth/logout                        logout (requires auth)
///
/// /workspace/location                 choose location (PUT)
/// /workspace/arcs                     ARC summaries at the location
/// /workspace/current-arc              choose ARC (PUT)
/// /workspace/ppp                      list (GET), update (POST)
/// /workspace/carryover                link PPP entries to the ARC (POST)
/// /workspace/associated               PinP and PPM images of the ARC
/// /workspace/descriptions             description sheet and carry-over text
/// /workspace/tracker/no-art           tracker art status (POST)
/// /workspace/tracker/unknown-art      tracker art status (POST)
/// /workspace/done                     hero image + done date (POST)
///
/// /editor/ppp                         get (?uuid=|id=), save (POST)
/// /editor/ppm                         get (?uuid=|location=), save (POST)
/// /editor/ppm/search                  location search
///
/// /vocabulary/terms                   autocomplete list (public)
/// /vocabulary/search                  term detail (public)
/// /vocabulary/categories              category images (public)
/// /vocabulary/images                  images in a category (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/workspace", workspace::router())
        .nest("/editor", editor::router())
        .nest("/vocabulary", vocabulary::router())
}
