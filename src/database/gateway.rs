use async_trait::async_trait;

use crate::database::manager::PersistenceError;
use crate::database::models::{Map, MapSummary, NewMap, NewPoint, Point, User};

pub type MapId = i32;
pub type PointId = i32;

/// Outcome of a lookup keyed by a parent entity, keeping "the parent exists
/// but has no children" apart from "the parent does not exist".
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Empty,
    NotFound,
}

impl<T> Lookup<Vec<T>> {
    /// Classify rows read for a parent that is known to exist
    pub fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            Lookup::Empty
        } else {
            Lookup::Found(rows)
        }
    }
}

/// Boundary between the route handlers and the relational store.
///
/// Each call is an independent unit of work. Nothing is cached between calls
/// and no two calls share a transaction.
#[async_trait]
pub trait MapGateway: Send + Sync {
    /// Insert a map and return its assigned id
    async fn create_map(&self, map: NewMap) -> Result<MapId, PersistenceError>;

    /// Every map, oldest first. Empty when no maps exist.
    async fn map_names(&self) -> Result<Vec<MapSummary>, PersistenceError>;

    async fn map_by_id(&self, map_id: MapId) -> Result<Option<Map>, PersistenceError>;

    /// Points belonging to `map_id`, in insertion order
    async fn points_by_map_id(&self, map_id: MapId) -> Result<Lookup<Vec<Point>>, PersistenceError>;

    /// Insert a point. Fails with `Constraint` when the parent map is missing.
    async fn add_point(&self, point: NewPoint) -> Result<PointId, PersistenceError>;

    /// Delete a map and, through the foreign key, its points. Returns whether a row was removed.
    async fn delete_map(&self, map_id: MapId) -> Result<bool, PersistenceError>;

    async fn users(&self) -> Result<Vec<User>, PersistenceError>;

    /// Round-trip to the store
    async fn ping(&self) -> Result<(), PersistenceError>;
}
