#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use tower::ServiceExt;

use wikimaps::database::models::{Map, MapSummary, NewMap, NewPoint, Point, User};
use wikimaps::database::{Lookup, MapGateway, MapId, PersistenceError, PointId};
use wikimaps::session::SessionKeys;
use wikimaps::AppState;

pub const SECRET: &str = "integration-test-secret";

#[derive(Default)]
struct Tables {
    maps: Vec<Map>,
    points: Vec<Point>,
    users: Vec<User>,
    calls: Vec<&'static str>,
    offline: bool,
}

/// In-process `MapGateway` double that records every call
#[derive(Clone, Default)]
pub struct MemoryGateway {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every subsequent call fails as if the store were unreachable
    pub fn go_offline(&self) {
        self.tables.lock().unwrap().offline = true;
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.tables.lock().unwrap().calls.clone()
    }

    pub fn points(&self) -> Vec<Point> {
        self.tables.lock().unwrap().points.clone()
    }

    pub fn maps(&self) -> Vec<Map> {
        self.tables.lock().unwrap().maps.clone()
    }

    pub fn insert_user(&self, id: &str, name: &str) {
        self.tables.lock().unwrap().users.push(User {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: None,
        });
    }

    fn record(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, Tables>, PersistenceError> {
        let mut tables = self.tables.lock().unwrap();
        tables.calls.push(call);
        if tables.offline {
            return Err(PersistenceError::Connection("store offline".to_string()));
        }
        Ok(tables)
    }
}

#[async_trait]
impl MapGateway for MemoryGateway {
    async fn create_map(&self, map: NewMap) -> Result<MapId, PersistenceError> {
        let mut tables = self.record("create_map")?;
        let id = tables.maps.len() as MapId + 1;
        tables.maps.push(Map {
            id,
            title: map.title,
            description: map.description,
            user_id: map.user_id,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn map_names(&self) -> Result<Vec<MapSummary>, PersistenceError> {
        let tables = self.record("map_names")?;
        Ok(tables
            .maps
            .iter()
            .map(|m| MapSummary {
                id: m.id,
                title: m.title.clone(),
                description: m.description.clone(),
            })
            .collect())
    }

    async fn map_by_id(&self, map_id: MapId) -> Result<Option<Map>, PersistenceError> {
        let tables = self.record("map_by_id")?;
        Ok(tables.maps.iter().find(|m| m.id == map_id).cloned())
    }

    async fn points_by_map_id(&self, map_id: MapId) -> Result<Lookup<Vec<Point>>, PersistenceError> {
        let tables = self.record("points_by_map_id")?;
        if !tables.maps.iter().any(|m| m.id == map_id) {
            return Ok(Lookup::NotFound);
        }
        let points: Vec<Point> = tables.points.iter().filter(|p| p.map_id == map_id).cloned().collect();
        Ok(Lookup::from_rows(points))
    }

    async fn add_point(&self, point: NewPoint) -> Result<PointId, PersistenceError> {
        let mut tables = self.record("add_point")?;
        if !tables.maps.iter().any(|m| m.id == point.map_id) {
            return Err(PersistenceError::Constraint("points_map_id_fkey".to_string()));
        }
        let id = tables.points.len() as PointId + 1;
        tables.points.push(Point {
            id,
            title: point.title,
            description: point.description,
            img: point.img,
            map_id: point.map_id,
            lat: point.lat,
            long: point.long,
            user_id: point.user_id,
        });
        Ok(id)
    }

    async fn delete_map(&self, map_id: MapId) -> Result<bool, PersistenceError> {
        let mut tables = self.record("delete_map")?;
        let before = tables.maps.len();
        tables.maps.retain(|m| m.id != map_id);
        tables.points.retain(|p| p.map_id != map_id);
        Ok(tables.maps.len() < before)
    }

    async fn users(&self) -> Result<Vec<User>, PersistenceError> {
        Ok(self.record("users")?.users.clone())
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        self.record("ping").map(|_| ())
    }
}

pub fn session_keys() -> SessionKeys {
    SessionKeys::new(SECRET, "session", Duration::hours(24), false).expect("session keys")
}

pub struct TestApp {
    pub router: Router,
    pub gateway: MemoryGateway,
}

impl TestApp {
    pub fn new() -> Self {
        let gateway = MemoryGateway::new();
        let state = AppState::new(Arc::new(gateway.clone()), session_keys());
        Self {
            router: wikimaps::app(state),
            gateway,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.expect("router is infallible")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        self.send(request("GET", uri, cookie, None)).await
    }

    pub async fn post_form(&self, uri: &str, cookie: Option<&str>, body: &str) -> Response<Body> {
        self.send(request("POST", uri, cookie, Some(body))).await
    }

    /// Log in through `/login/:id` and return the `name=value` cookie pair
    pub async fn login(&self, user_id: &str) -> String {
        let response = self.get(&format!("/login/{}", user_id), None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        cookie_pair(&response).expect("login sets a session cookie")
    }
}

pub fn request(method: &str, uri: &str, cookie: Option<&str>, form: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match form {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

/// `name=value` part of the response's Set-Cookie header
pub fn cookie_pair(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(|pair| pair.trim().to_string())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("JSON body")
}
