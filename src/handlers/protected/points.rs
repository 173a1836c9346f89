use axum::{
    extract::{rejection::FormRejection, Path, State},
    Extension, Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::database::models::NewPoint;
use crate::database::MapId;
use crate::error::{ApiError, JsonError};
use crate::handlers::parse_map_id;
use crate::middleware::AuthUser;
use crate::state::AppState;

/// Urlencoded point submission. Every field is required.
#[derive(Debug, Default, Deserialize)]
pub struct PointForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub img: Option<String>,
    pub map_id: Option<String>,
    pub lat: Option<String>,
    pub long: Option<String>,
}

impl PointForm {
    /// Validate against the map named in the path. The body's `map_id` must
    /// be present and agree with it.
    pub fn into_new_point(self, path_map_id: MapId, user_id: &str) -> Result<NewPoint, ApiError> {
        let map_id: MapId = required(self.map_id, "map_id")?
            .parse()
            .map_err(|_| invalid("map_id"))?;
        if map_id != path_map_id {
            return Err(ApiError::not_found(format!(
                "Point targets map {} but was posted to map {}",
                map_id, path_map_id
            )));
        }

        Ok(NewPoint {
            title: required(self.title, "title")?,
            description: self.description.unwrap_or_default(),
            img: self.img.unwrap_or_default(),
            map_id,
            lat: coordinate(self.lat, "lat", 90.0)?,
            long: coordinate(self.long, "long", 180.0)?,
            user_id: user_id.to_string(),
        })
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::not_found(format!("Missing point field '{}'", field)))
}

fn invalid(field: &str) -> ApiError {
    ApiError::not_found(format!("Invalid point field '{}'", field))
}

fn coordinate(value: Option<String>, field: &str, bound: f64) -> Result<f64, ApiError> {
    let parsed: f64 = required(value, field)?.parse().map_err(|_| invalid(field))?;
    if !parsed.is_finite() || parsed.abs() > bound {
        return Err(invalid(field));
    }
    Ok(parsed)
}

/// POST /maps/:map_id/points
///
/// 200 with the new point id on success. A body that does not parse, a
/// validation failure or a persistence failure all answer 404 and insert nothing.
pub async fn point_add(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(map_id): Path<String>,
    form: Result<Form<PointForm>, FormRejection>,
) -> Result<Json<Value>, JsonError> {
    let map_id = parse_map_id(&map_id)?;
    let Form(form) = form.map_err(|rejection| {
        tracing::debug!("Unreadable point body for map {}: {}", map_id, rejection);
        ApiError::not_found(format!("Could not read point for map {}", map_id))
    })?;
    let point = form.into_new_point(map_id, &user.user_id)?;

    match state.gateway.add_point(point).await {
        Ok(id) => {
            tracing::info!("User '{}' added point {} to map {}", user.user_id, id, map_id);
            Ok(Json(json!({ "success": true, "data": { "id": id } })))
        }
        Err(e) => {
            tracing::error!("Failed to add point to map {}: {}", map_id, e);
            Err(ApiError::not_found(format!("Could not add point to map {}", map_id)).into())
        }
    }
}

/// POST /maps/:map_id/points/:point_id
pub async fn point_edit(Path((_map_id, _point_id)): Path<(String, String)>) -> JsonError {
    ApiError::not_implemented("Editing points is not available yet").into()
}

/// POST /maps/:map_id/points/:point_id/delete
pub async fn point_delete(Path((_map_id, _point_id)): Path<(String, String)>) -> JsonError {
    ApiError::not_implemented("Deleting points is not available yet").into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> PointForm {
        PointForm {
            title: Some("Lookout".to_string()),
            description: Some("view".to_string()),
            img: Some("/img/lookout.png".to_string()),
            map_id: Some("3".to_string()),
            lat: Some("50.9090".to_string()),
            long: Some("-122.145".to_string()),
        }
    }

    #[test]
    fn keeps_coordinates_exact() {
        let point = form().into_new_point(3, "alice").unwrap();
        assert_eq!(point.lat, 50.9090);
        assert_eq!(point.long, -122.145);
        assert_eq!(point.user_id, "alice");
    }

    #[test]
    fn missing_map_id_is_not_found() {
        let mut f = form();
        f.map_id = None;
        assert!(matches!(f.into_new_point(3, "alice"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn mismatched_map_id_is_not_found() {
        assert!(matches!(form().into_new_point(4, "alice"), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn rejects_bad_coordinates() {
        let mut f = form();
        f.lat = Some("north".to_string());
        assert!(f.into_new_point(3, "alice").is_err());

        let mut f = form();
        f.long = Some("181".to_string());
        assert!(f.into_new_point(3, "alice").is_err());

        let mut f = form();
        f.lat = Some("NaN".to_string());
        assert!(f.into_new_point(3, "alice").is_err());
    }
}
