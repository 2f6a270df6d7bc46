//! Health and debug routes.

use axum::http::StatusCode;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_dump_hidden_by_default() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/debug/dump", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dump_when_enabled() {
    let app = TestApp::with_config("[server]\ndebug_routes = true\n");
    app.register("a@x.com", PASSWORD).await;
    app.add_folder("Work").await;

    let response = app.request("GET", "/api/debug/dump", None, None).await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["users"].as_array().unwrap().len(), 1);
    assert!(data["users"][0].get("password_hash").is_none());
    assert_eq!(data["folders"].as_array().unwrap().len(), 2);
}
