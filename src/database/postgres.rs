use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::database::gateway::{Lookup, MapGateway, MapId, PointId};
use crate::database::manager::PersistenceError;
use crate::database::models::{Map, MapSummary, NewMap, NewPoint, Point, User};

/// Row of `maps LEFT JOIN points`: every point column is NULL when the map has no points
#[derive(Debug, FromRow)]
struct MapPointRow {
    id: Option<i32>,
    title: Option<String>,
    description: Option<String>,
    img: Option<String>,
    lat: Option<f64>,
    long: Option<f64>,
    user_id: Option<String>,
}

impl MapPointRow {
    fn into_point(self, map_id: MapId) -> Option<Point> {
        Some(Point {
            id: self.id?,
            title: self.title?,
            description: self.description?,
            img: self.img?,
            map_id,
            lat: self.lat?,
            long: self.long?,
            user_id: self.user_id?,
        })
    }
}

/// No rows means the map is absent; a single all-NULL row means it has no points
fn collect_points(map_id: MapId, rows: Vec<MapPointRow>) -> Lookup<Vec<Point>> {
    if rows.is_empty() {
        return Lookup::NotFound;
    }
    Lookup::from_rows(rows.into_iter().filter_map(|row| row.into_point(map_id)).collect())
}

/// `MapGateway` backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MapGateway for PgGateway {
    async fn create_map(&self, map: NewMap) -> Result<MapId, PersistenceError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO maps (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING id",
        )
        .bind(&map.title)
        .bind(&map.description)
        .bind(&map.user_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created map {} for user '{}'", id, map.user_id);
        Ok(id)
    }

    async fn map_names(&self) -> Result<Vec<MapSummary>, PersistenceError> {
        let maps = sqlx::query_as::<_, MapSummary>(
            "SELECT id, title, description FROM maps ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(maps)
    }

    async fn map_by_id(&self, map_id: MapId) -> Result<Option<Map>, PersistenceError> {
        let map = sqlx::query_as::<_, Map>(
            "SELECT id, title, description, user_id, created_at
             FROM maps
             WHERE id = $1",
        )
        .bind(map_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(map)
    }

    async fn points_by_map_id(&self, map_id: MapId) -> Result<Lookup<Vec<Point>>, PersistenceError> {
        // One statement, so the map's existence and its points come from the same snapshot
        let rows = sqlx::query_as::<_, MapPointRow>(
            "SELECT p.id, p.title, p.description, p.img, p.lat, p.long, p.user_id
             FROM maps m
             LEFT JOIN points p ON p.map_id = m.id
             WHERE m.id = $1
             ORDER BY p.id",
        )
        .bind(map_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collect_points(map_id, rows))
    }

    async fn add_point(&self, point: NewPoint) -> Result<PointId, PersistenceError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO points (title, description, img, map_id, lat, long, user_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&point.title)
        .bind(&point.description)
        .bind(&point.img)
        .bind(point.map_id)
        .bind(point.lat)
        .bind(point.long)
        .bind(&point.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_map(&self, map_id: MapId) -> Result<bool, PersistenceError> {
        let result = sqlx::query("DELETE FROM maps WHERE id = $1")
            .bind(map_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn users(&self) -> Result<Vec<User>, PersistenceError> {
        let users = sqlx::query_as::<_, User>("SELECT id, name, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
