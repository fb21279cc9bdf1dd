use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use serde_json::{Value, json};
use tower::ServiceExt;

use super::*;
use crate::state::test_helpers;
use crate::storage::test_doubles::ReadOnlyStore;
use crate::storage::{MemoryStore, ResourceKey, StorageClient};

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[test]
fn mount_path_only_for_local_prefixes() {
    assert_eq!(mount_path("/uploads/").as_deref(), Some("/uploads"));
    assert_eq!(mount_path("https://cdn.test/uploads"), None);
    assert_eq!(mount_path("/"), None);
}

#[tokio::test]
async fn healthz_returns_ok() {
    let (status, _) = send(app(test_helpers::test_app_state()), Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn users_endpoint_filters_by_query() {
    let (status, body) = send(app(test_helpers::test_app_state()), Method::GET, "/api/users?q=mentor", None).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["role"] == "mentor"));
}

#[tokio::test]
async fn user_lookup_returns_card_or_not_found() {
    let state = test_helpers::test_app_state();
    let (status, body) = send(app(state.clone()), Method::GET, "/api/users/mei-tanaka", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Mei Tanaka");

    let (status, _) = send(app(state), Method::GET, "/api/users/nobody", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn projects_endpoint_filters_by_tag() {
    let (status, body) = send(app(test_helpers::test_app_state()), Method::GET, "/api/projects?tag=data", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["projects"].as_array().unwrap().len(), 1);
    assert_eq!(body["projects"][0]["id"], "transit-pulse");
}

#[tokio::test]
async fn courses_round_trip_through_put_and_get() {
    let state = test_helpers::test_app_state();
    let payload = json!([
        { "id": "web", "title": "Web Development", "imageRef": "web.png", "link": "/courses/web" },
        { "id": "bad", "title": "", "link": "/courses/bad" }
    ]);

    let (status, body) = send(app(state.clone()), Method::PUT, "/api/courses", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "saved": 1, "dropped": 1 }));

    let (status, body) = send(app(state), Method::GET, "/api/courses", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["courses"][0]["image_url"], "/uploads/web.png");
    assert_eq!(body["courses"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn put_courses_rejects_non_array_body() {
    let (status, _) =
        send(app(test_helpers::test_app_state()), Method::PUT, "/api/courses", Some(json!({ "id": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn carousel_save_filters_empty_slots_and_drives_home_view() {
    let store = Arc::new(MemoryStore::with_values([(ResourceKey::Carousel, json!({ "images": ["a.png", "", "c.png"] }))]));
    let state = test_helpers::test_app_state_with(store.clone());

    let body = json!({ "slots": [{ "action": "keep" }, { "action": "keep" }, { "action": "keep" }] });
    let (status, saved) = send(app(state.clone()), Method::PUT, "/api/carousel", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["images"], json!(["a.png", "c.png"]));
    assert_eq!(store.get(ResourceKey::Carousel).await.unwrap(), Some(json!({ "images": ["a.png", "c.png"] })));

    let (_, snapshot) = send(app(state.clone()), Method::GET, "/api/carousel/state", None).await;
    assert_eq!(snapshot["selected_index"], 0);
    assert_eq!(snapshot["slides"][1]["source"], "/uploads/c.png");

    let (_, snapshot) = send(app(state.clone()), Method::POST, "/api/carousel/next", None).await;
    assert_eq!(snapshot["selected_index"], 1);
    let (_, snapshot) = send(app(state.clone()), Method::POST, "/api/carousel/select/7", None).await;
    assert_eq!(snapshot["selected_index"], 1);
    let (_, snapshot) = send(app(state), Method::POST, "/api/carousel/previous", None).await;
    assert_eq!(snapshot["selected_index"], 0);
}

#[tokio::test]
async fn carousel_save_over_sparse_store_edits_the_right_slot() {
    let store = Arc::new(MemoryStore::with_values([(ResourceKey::Carousel, json!({ "images": ["a.png", null, "c.png"] }))]));
    let state = test_helpers::test_app_state_with(store.clone());

    let body = json!({ "slots": [null, { "name": "b.png", "size": 2048 }, { "action": "clear" }] });
    let (status, saved) = send(app(state), Method::PUT, "/api/carousel", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["images"], json!(["a.png", "b.png"]));
    assert_eq!(store.get(ResourceKey::Carousel).await.unwrap(), Some(json!({ "images": ["a.png", "b.png"] })));
}

#[tokio::test]
async fn carousel_save_rejects_oversized_selection_but_saves_the_rest() {
    let store = Arc::new(MemoryStore::with_values([(ResourceKey::Carousel, json!({ "images": ["old.png"] }))]));
    let state = test_helpers::test_app_state_with(store.clone());

    let body = json!({ "slots": [
        { "action": "select", "name": "huge.png", "size": 6 * 1024 * 1024 },
        { "action": "select", "name": "new.png", "size": 2048 }
    ] });
    let (status, saved) = send(app(state), Method::PUT, "/api/carousel", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["images"], json!(["old.png", "new.png"]));
    assert_eq!(saved["rejected"][0]["slot"], 0);
}

#[tokio::test]
async fn carousel_save_rejects_more_than_three_slots() {
    let body = json!({ "slots": [
        { "action": "keep" }, { "action": "keep" }, { "action": "keep" }, { "action": "keep" }
    ] });
    let (status, _) = send(app(test_helpers::test_app_state()), Method::PUT, "/api/carousel", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn carousel_save_failure_returns_service_unavailable() {
    let store = Arc::new(ReadOnlyStore { inner: MemoryStore::new() });
    let state = test_helpers::test_app_state_with(store);

    let body = json!({ "slots": [{ "action": "select", "name": "a.png", "size": 10 }] });
    let (status, _) = send(app(state.clone()), Method::PUT, "/api/carousel", Some(body)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(state.home.snapshot().slides.is_empty());
}

#[tokio::test]
async fn get_carousel_returns_stored_config() {
    let store = Arc::new(MemoryStore::with_values([(ResourceKey::Carousel, json!({ "images": ["x.png"] }))]));
    let (status, body) =
        send(app(test_helpers::test_app_state_with(store)), Method::GET, "/api/carousel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "images": ["x.png"] }));
}

#[tokio::test]
async fn upload_then_serve_static_file() {
    let state = test_helpers::test_app_state();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/uploads/banner.png")
        .body(Body::from(&b"not-really-a-png"[..]))
        .unwrap();
    let response = app(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let stored: Value = serde_json::from_slice(&bytes).unwrap();
    let name = stored["name"].as_str().unwrap().to_owned();

    let request = Request::builder().uri(format!("/uploads/{name}")).body(Body::empty()).unwrap();
    let response = app(state.clone()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let served = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&served[..], b"not-really-a-png");

    let _ = tokio::fs::remove_dir_all(&state.config.uploads_dir).await;
}

#[tokio::test]
async fn upload_rejects_unsupported_type() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/uploads/notes.txt")
        .body(Body::from("hello"))
        .unwrap();
    let response = app(test_helpers::test_app_state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
