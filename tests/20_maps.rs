mod common;

use axum::http::{header, StatusCode};
use common::TestApp;

#[tokio::test]
async fn created_map_appears_in_listing() {
    let app = TestApp::new();
    let cookie = app.login("1").await;

    let response = app
        .post_form("/maps/new", Some(&cookie), "title=T&description=D")
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_text(response).await;
    assert!(body.contains("data-view=\"create_map\""));
    assert!(body.contains("href=\"/maps/1\""));

    let maps = app.gateway.maps();
    assert_eq!(maps.len(), 1);
    assert_eq!(maps[0].title, "T");
    assert_eq!(maps[0].description, "D");
    assert_eq!(maps[0].user_id, "1");

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_text(response).await;
    assert!(body.contains("<a href=\"/maps/1\">T</a>"));
}

#[tokio::test]
async fn owner_is_session_user_not_form_field() {
    let app = TestApp::new();
    let cookie = app.login("alice").await;

    app.post_form("/maps/new", Some(&cookie), "title=Parks&user_id=1").await;
    assert_eq!(app.gateway.maps()[0].user_id, "alice");
}

#[tokio::test]
async fn map_without_title_is_rejected() {
    let app = TestApp::new();
    let cookie = app.login("alice").await;

    let response = app.post_form("/maps/new", Some(&cookie), "description=D").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.gateway.maps().is_empty());
    assert!(!app.gateway.calls().contains(&"create_map"));
}

#[tokio::test]
async fn empty_listing_renders() {
    let app = TestApp::new();
    let body = common::body_text(app.get("/", None).await).await;
    assert!(body.contains("No maps yet."));
}

#[tokio::test]
async fn single_map_page_and_not_found() {
    let app = TestApp::new();
    let cookie = app.login("alice").await;
    app.post_form("/maps/new", Some(&cookie), "title=Murals&description=Street+art").await;

    let response = app.get("/maps/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_text(response).await;
    assert!(body.contains("<h1>Murals</h1>"));
    assert!(body.contains("Street art"));

    assert_eq!(app.get("/maps/2", None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/maps/abc", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_form_for_existing_map() {
    let app = TestApp::new();
    let cookie = app.login("alice").await;
    app.post_form("/maps/new", Some(&cookie), "title=Murals").await;

    let response = app.get("/maps/1/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_text(response).await;
    assert!(body.contains("action=\"/maps/1/points\""));

    let response = app.get("/maps/9/edit", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_owner_deletes_map() {
    let app = TestApp::new();
    let alice = app.login("alice").await;
    let bob = app.login("bob").await;
    app.post_form("/maps/new", Some(&alice), "title=Mine").await;

    let response = app.post_form("/maps/1/delete", Some(&bob), "").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(app.gateway.maps().len(), 1);

    let response = app.post_form("/maps/1/delete", Some(&alice), "").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    assert!(app.gateway.maps().is_empty());

    let response = app.post_form("/maps/1/delete", Some(&alice), "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_is_translated_not_fatal() {
    let app = TestApp::new();
    app.gateway.go_offline();

    let response = app.get("/", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = common::body_text(response).await;
    assert!(body.contains("Database temporarily unavailable"));

    // The router keeps serving after a failed request
    let response = app.get("/maps/1/json", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
