use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Map {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Listing entry returned by `MapGateway::map_names`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MapSummary {
    pub id: i32,
    pub title: String,
    pub description: String,
}

/// Fields accepted by `MapGateway::create_map`
#[derive(Debug, Clone, PartialEq)]
pub struct NewMap {
    pub title: String,
    pub description: String,
    pub user_id: String,
}
