use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Html,
    Json,
};
use serde_json::json;

use crate::database::models::Point;
use crate::database::Lookup;
use crate::error::{ApiError, JsonError};
use crate::handlers::parse_map_id;
use crate::state::AppState;
use crate::views::{self, View};

/// GET / - all maps
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> Result<Html<String>, ApiError> {
    let user_id = state.sessions.read(&headers);
    let maps = state.gateway.map_names().await?;

    Ok(views::render(View::AllMaps, &json!({ "user_id": user_id, "maps": maps })))
}

/// GET /maps/:map_id - single map page
pub async fn map_show(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
    headers: HeaderMap,
) -> Result<Html<String>, ApiError> {
    let map_id = parse_map_id(&map_id)?;
    let user_id = state.sessions.read(&headers);

    let map = state
        .gateway
        .map_by_id(map_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Map {} not found", map_id)))?;

    Ok(views::render(View::ViewMap, &json!({ "user_id": user_id, "map": map })))
}

/// GET /maps/:map_id/json - the map's points as a JSON array.
///
/// An existing map without points yields `[]`; an unknown map yields 404.
pub async fn map_points_json(
    State(state): State<AppState>,
    Path(map_id): Path<String>,
) -> Result<Json<Vec<Point>>, JsonError> {
    let map_id = parse_map_id(&map_id)?;

    match state.gateway.points_by_map_id(map_id).await? {
        Lookup::Found(points) => Ok(Json(points)),
        Lookup::Empty => Ok(Json(Vec::new())),
        Lookup::NotFound => Err(ApiError::not_found(format!("Map {} not found", map_id)).into()),
    }
}
