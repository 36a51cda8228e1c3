use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use taskboard::api;
use taskboard::db::Store;

const ORIGIN: &str = "http://localhost:3000";

fn app() -> Router {
    api::router(Store::in_memory().unwrap(), HeaderValue::from_static(ORIGIN))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create(app: &Router, text: &str) -> Value {
    let (status, task) = send(
        app,
        Method::POST,
        "/api/tasks",
        Some(json!({"text": text, "category": "Work", "priority": "medium", "dueDate": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    task
}

#[tokio::test]
async fn empty_list_is_an_empty_array() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_then_list() {
    let app = app();
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/tasks",
        Some(json!({
            "text": "Buy milk",
            "category": "Shopping",
            "priority": "low",
            "dueDate": "2024-06-01"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["id"], json!(1));
    assert_eq!(created["completed"], json!(0));
    assert_eq!(created["text"], json!("Buy milk"));
    assert_eq!(created["category"], json!("Shopping"));
    assert_eq!(created["priority"], json!("low"));
    assert_eq!(created["dueDate"], json!("2024-06-01"));
    assert!(created["createdAt"].is_string());

    create(&app, "second").await;
    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["text"], json!("second"));
    assert_eq!(list[1], created);
}

#[tokio::test]
async fn toggle_twice() {
    let app = app();
    let task = create(&app, "t").await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"completed": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Task updated", "changes": 1}));
    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list[0]["completed"], json!(1));

    let (_, body) = send(&app, Method::PUT, &uri, Some(json!({"completed": false}))).await;
    assert_eq!(body["changes"], json!(1));
    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list[0], task);
}

#[tokio::test]
async fn update_edits_all_fields() {
    let app = app();
    let task = create(&app, "draft").await;
    let uri = format!("/api/tasks/{}", task["id"]);
    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({"text": "final", "category": null, "priority": "high", "dueDate": "2025-01-31"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(1));

    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list[0]["text"], json!("final"));
    assert_eq!(list[0]["category"], Value::Null);
    assert_eq!(list[0]["priority"], json!("high"));
    assert_eq!(list[0]["dueDate"], json!("2025-01-31"));
    assert_eq!(list[0]["createdAt"], task["createdAt"]);
}

#[tokio::test]
async fn delete_twice() {
    let app = app();
    let task = create(&app, "gone").await;
    let uri = format!("/api/tasks/{}", task["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Task deleted", "changes": 1}));

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(0));

    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unknown_id_is_not_a_fault() {
    let app = app();
    let (status, body) = send(&app, Method::PUT, "/api/tasks/999", Some(json!({"completed": 1}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(0));

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/999", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(0));
}

#[tokio::test]
async fn empty_text_is_accepted() {
    let app = app();
    let (status, task) = send(&app, Method::POST, "/api/tasks", Some(json!({"text": ""}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["text"], json!(""));
    assert_eq!(task["priority"], Value::Null);
}

#[tokio::test]
async fn malformed_requests_are_rejected() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/tasks", Some(json!({"category": "Work"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, Method::PUT, "/api/tasks/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("at least one"));

    let (status, _) = send(&app, Method::PUT, "/api/tasks/1", Some(json!({"id": 5}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, Method::DELETE, "/api/tasks/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tasks")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn body_without_json_content_type_is_415() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/tasks")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"text":"t"}"#))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());

    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn null_completed_clears_the_flag() {
    let app = app();
    let task = create(&app, "t").await;
    let uri = format!("/api/tasks/{}", task["id"]);
    send(&app, Method::PUT, &uri, Some(json!({"completed": 1}))).await;

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({"completed": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changes"], json!(1));
    let (_, list) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(list[0]["completed"], json!(0));
}

#[tokio::test]
async fn storage_fault_is_500() {
    let store = Store::in_memory().unwrap();
    store
        .with_conn(|conn| {
            conn.execute_batch("DROP TABLE tasks")?;
            Ok(())
        })
        .unwrap();
    let app = api::router(store, HeaderValue::from_static(ORIGIN));

    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn cors_allows_configured_origin_only() {
    let app = app();

    let preflight = |origin: &'static str| {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/tasks")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(preflight(ORIGIN)).await.unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        Some(&HeaderValue::from_static(ORIGIN))
    );
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        Some(&HeaderValue::from_static("true"))
    );

    let response = app
        .clone()
        .oneshot(preflight("http://evil.example"))
        .await
        .unwrap();
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn health() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}
