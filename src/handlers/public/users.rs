use axum::{extract::State, routing::get, Json, Router};

use crate::database::models::User;
use crate::error::JsonError;
use crate::state::AppState;

/// Sub-router mounted at `/api/users`
pub fn users_router() -> Router<AppState> {
    Router::new().route("/", get(users_index))
}

/// GET /api/users - every user row
async fn users_index(State(state): State<AppState>) -> Result<Json<Vec<User>>, JsonError> {
    Ok(Json(state.gateway.users().await?))
}
