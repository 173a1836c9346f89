use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Identity resolved from the session cookie, injected for protected handlers
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

/// Session gate for protected routes.
///
/// Continues with `AuthUser` in the request extensions when the session
/// cookie verifies, otherwise answers 401 without running the handler.
/// Never writes to the session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user_id = state.sessions.read(request.headers()).ok_or_else(|| {
        tracing::debug!("Unauthenticated request to {}", request.uri().path());
        ApiError::unauthorized("You must be logged in to view this page.")
    })?;

    request.extensions_mut().insert(AuthUser { user_id });

    Ok(next.run(request).await)
}
