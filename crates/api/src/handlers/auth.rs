//! Handlers for the `/auth` resource.
//!
//! The workspace pages and the single-entry editors have separate accounts.
//! A researcher login opens a workspace session whose id is embedded in
//! the returned token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use palp_core::error::CoreError;
use palp_core::roles::{ROLE_EDITOR, ROLE_RESEARCHER};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::config::Account;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

const WRONG_PASSWORD: &str = "Sorry, wrong password!";

/// Request body for both login endpoints.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub role: &'static str,
}

fn check_credentials(account: &Account, input: &LoginRequest) -> AppResult<()> {
    let password_ok = verify_password(&input.password, &account.password_hash)
        .map_err(|e| AppError::InternalError(format!("Configured password hash is invalid: {e}")))?;
    if !password_ok || input.username != account.username {
        tracing::warn!(username = %input.username, "Rejected login");
        return Err(AppError::Core(CoreError::Unauthorized(WRONG_PASSWORD.into())));
    }
    Ok(())
}

fn issue_token(
    state: &AppState,
    username: &str,
    role: &'static str,
    session_id: Option<&str>,
) -> AppResult<LoginResponse> {
    let access_token = generate_access_token(username, role, session_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;
    Ok(LoginResponse {
        access_token,
        expires_in: state.config.jwt.expiry_mins * 60,
        role,
    })
}

/// POST /api/v1/auth/login
///
/// Researcher login. Opens a fresh workspace session.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    check_credentials(&state.config.researcher, &input)?;

    let session_id = state.sessions.create().await;
    let response = issue_token(&state, &input.username, ROLE_RESEARCHER, Some(&session_id))?;
    tracing::info!(username = %input.username, "Researcher logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/editor-login
pub async fn editor_login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    check_credentials(&state.config.editor, &input)?;

    let response = issue_token(&state, &input.username, ROLE_EDITOR, None)?;
    tracing::info!(username = %input.username, "Editor logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Closes the caller's workspace session. Workspace requests made with the
/// same token are rejected afterwards.
pub async fn logout(State(state): State<AppState>, user: AuthUser) -> StatusCode {
    if let Some(session_id) = &user.session_id {
        state.sessions.remove(session_id).await;
    }
    tracing::info!(username = %user.username, "Logged out");
    StatusCode::NO_CONTENT
}
