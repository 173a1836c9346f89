use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A geotagged annotation. Coordinates are stored as DOUBLE PRECISION and
/// returned without conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Point {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub img: String,
    pub map_id: i32,
    pub lat: f64,
    pub long: f64,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPoint {
    pub title: String,
    pub description: String,
    pub img: String,
    pub map_id: i32,
    pub lat: f64,
    pub long: f64,
    pub user_id: String,
}
