use axum::routing::get;
use axum::Router;

use crate::handlers::vocabulary;
use crate::state::AppState;

/// Routes mounted at `/vocabulary` (public).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/terms", get(vocabulary::list_terms))
        .route("/search", get(vocabulary::search_term))
        .route("/categories", get(vocabulary::list_categories))
        .route("/images", get(vocabulary::category_images))
}
