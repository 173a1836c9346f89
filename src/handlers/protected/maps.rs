use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use serde_json::json;

use crate::database::models::NewMap;
use crate::error::ApiError;
use crate::handlers::parse_map_id;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::views::{self, View};

#[derive(Debug, Default, Deserialize)]
pub struct NewMapForm {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl NewMapForm {
    /// Owner is always the session identity, never a form field
    pub fn into_new_map(self, user_id: &str) -> Result<NewMap, ApiError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::bad_request("A map needs a title"))?;

        Ok(NewMap {
            title,
            description: self.description.unwrap_or_default().trim().to_string(),
            user_id: user_id.to_string(),
        })
    }
}

/// GET /maps/new
pub async fn map_new_form(Extension(user): Extension<AuthUser>) -> Html<String> {
    views::render(View::InitMap, &json!({ "user_id": user.user_id }))
}

/// POST /maps/new
pub async fn map_create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<NewMapForm>,
) -> Result<Html<String>, ApiError> {
    let new_map = form.into_new_map(&user.user_id)?;
    let title = new_map.title.clone();

    let map_id = state.gateway.create_map(new_map).await?;
    tracing::info!("User '{}' created map {}", user.user_id, map_id);

    Ok(views::render(
        View::CreateMap,
        &json!({ "user_id": user.user_id, "map_id": map_id, "title": title }),
    ))
}

/// GET /maps/:map_id/edit
pub async fn map_edit_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(map_id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let map_id = parse_map_id(&map_id)?;
    let map = state
        .gateway
        .map_by_id(map_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Map {} not found", map_id)))?;

    Ok(views::render(View::EditMap, &json!({ "user_id": user.user_id, "map": map })))
}

/// POST /maps/:map_id/delete - owner only
pub async fn map_delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(map_id): Path<String>,
) -> Result<Redirect, ApiError> {
    let map_id = parse_map_id(&map_id)?;
    let map = state
        .gateway
        .map_by_id(map_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Map {} not found", map_id)))?;

    if map.user_id != user.user_id {
        tracing::warn!("User '{}' tried to delete map {} owned by '{}'", user.user_id, map_id, map.user_id);
        return Err(ApiError::forbidden("Only the owner can delete this map"));
    }

    if !state.gateway.delete_map(map_id).await? {
        return Err(ApiError::not_found(format!("Map {} not found", map_id)));
    }

    tracing::info!("User '{}' deleted map {}", user.user_id, map_id);
    Ok(Redirect::to("/"))
}
