use axum::{
    extract::{Path, State},
    http::header::SET_COOKIE,
    response::{AppendHeaders, IntoResponse, Redirect},
};

use crate::error::ApiError;
use crate::state::AppState;

/// GET /login/:id - development login.
///
/// Trusts the path segment as the user identifier; there is no credential check.
pub async fn login(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let cookie = state.sessions.issue(&user_id).map_err(|e| {
        tracing::error!("Failed to issue session: {}", e);
        ApiError::internal_server_error("Could not start session")
    })?;

    tracing::info!("User '{}' logged in", user_id);
    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")))
}

/// POST /logout - destroy the whole session. Safe to repeat.
pub async fn logout(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let cookie = state.sessions.clear().map_err(|e| {
        tracing::error!("Failed to clear session: {}", e);
        ApiError::internal_server_error("Could not end session")
    })?;

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Redirect::to("/")))
}
