use axum::{extract::Path, response::Html, Extension};
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::views::{self, View};

/// GET /users/:id - profile page.
///
/// Only the session identity is real; the remaining fields are placeholders
/// until user records carry them.
pub async fn user_profile(Extension(user): Extension<AuthUser>, Path(_id): Path<String>) -> Html<String> {
    views::render(
        View::Profile,
        &json!({
            "user_id": user.user_id,
            "username": user.user_id,
            "email": "user2@example.com",
            "first_name": "John",
            "last_name": "Smith",
            "picture": "profilePic",
        }),
    )
}

/// POST /users/:id/favourites
pub async fn favourite_add(Path(_id): Path<String>) -> ApiError {
    ApiError::not_implemented("Favourites are not available yet")
}

/// POST /users/:id/favourites/:favourite_id/delete
pub async fn favourite_remove(Path((_id, _favourite_id)): Path<(String, String)>) -> ApiError {
    ApiError::not_implemented("Favourites are not available yet")
}
