use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row of the `users` table. The id is the same opaque identifier carried in
/// the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}
