//! Router behavior against a temporary image root.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use concierge_core::RoomCatalog;
use media_web::routes::router;
use media_web::AppState;
use tempfile::TempDir;
use tower::ServiceExt;

fn app() -> (Router, TempDir) {
    let images = tempfile::tempdir().unwrap();
    let villa = images.path().join("pool_villa");
    std::fs::create_dir(&villa).unwrap();
    std::fs::write(villa.join("1.jpg"), b"not really a jpeg").unwrap();

    let catalog = RoomCatalog::parse("Pool Villa=pool_villa;Tree House").unwrap();
    (router(AppState::new(catalog), images.path()), images)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_health() {
    let (app, _images) = app();
    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"status": "ok"}));
}

#[tokio::test]
async fn test_rooms_lists_catalog_in_menu_order() {
    let (app, _images) = app();
    let (status, body) = get(app, "/api/rooms").await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"index": 1, "name": "Pool villa", "folder": "pool_villa"},
            {"index": 2, "name": "Tree house", "folder": "tree_house"}
        ])
    );
}

#[tokio::test]
async fn test_serves_room_images() {
    let (app, _images) = app();
    let (status, body) = get(app, "/pool_villa/1.jpg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"not really a jpeg");
}

#[tokio::test]
async fn test_missing_image_is_not_found() {
    let (app, _images) = app();
    let (status, _) = get(app, "/pool_villa/9.jpg").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
