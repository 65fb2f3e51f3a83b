//! Role-based access control extractors.
//!
//! The workspace pages and the single-entry editors have separate logins;
//! each extractor wraps [`AuthUser`] and rejects the other realm's tokens.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use palp_core::error::CoreError;
use palp_core::roles::{ROLE_EDITOR, ROLE_RESEARCHER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shown when a researcher token outlives its workspace session.
pub const SESSION_ENDED: &str = "Your workspace session has ended. Please log in again.";

/// A researcher together with their workspace session key.
///
/// Tokens whose session was closed by logout or has expired are rejected
/// with 401.
///
/// ```ignore
/// async fn arcs(
///     State(state): State<AppState>,
///     researcher: RequireResearcher,
/// ) -> AppResult<Json<()>> {
///     let session = workspace::session(&state, &researcher.session_id).await?;
///     Ok(Json(()))
/// }
/// ```
pub struct RequireResearcher {
    pub user: AuthUser,
    pub session_id: String,
}

impl FromRequestParts<AppState> for RequireResearcher {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_RESEARCHER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Workspace login required".into(),
            )));
        }
        let session_id = user.session_id.clone().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Token has no workspace session".into()))
        })?;
        if !state.sessions.contains(&session_id).await {
            return Err(AppError::Core(CoreError::Unauthorized(SESSION_ENDED.into())));
        }
        Ok(RequireResearcher { user, session_id })
    }
}

/// Requires the `editor` role. Rejects with 403 Forbidden otherwise.
pub struct RequireEditor(pub AuthUser);

impl FromRequestParts<AppState> for RequireEditor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_EDITOR {
            return Err(AppError::Core(CoreError::Forbidden(
                "This page is only accessible by logging in.".into(),
            )));
        }
        Ok(RequireEditor(user))
    }
}
