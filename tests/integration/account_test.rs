//! Registration and login over HTTP.

use axum::http::StatusCode;

use crate::helpers::{Creds, EMAIL, PASSWORD, TestApp, USER};

#[tokio::test]
async fn test_register_returns_account() {
    let app = TestApp::new();
    let body = app.register("New@Example.com", PASSWORD).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "new@example.com");
    assert!(body["data"]["root_folder_id"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::with_user().await;
    let response = app
        .request(
            "POST",
            "/api/accounts",
            Some(serde_json::json!({ "email": "A@X.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "EMAIL_TAKEN");
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/accounts",
            Some(serde_json::json!({ "email": "nope", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/accounts",
            Some(serde_json::json!({ "email": "b@x.com", "password": "short" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION");

    let response = app
        .request("POST", "/api/accounts", Some(serde_json::json!({})), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login() {
    let app = TestApp::with_user().await;
    let response = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(serde_json::json!({ "email": EMAIL, "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], EMAIL);
}

#[tokio::test]
async fn test_login_failures_look_the_same() {
    let app = TestApp::with_user().await;

    let wrong_password = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(serde_json::json!({ "email": EMAIL, "password": "not-it-at-all" })),
            None,
        )
        .await;
    let unknown_email = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(serde_json::json!({ "email": "ghost@x.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_tree_routes_require_credentials() {
    let app = TestApp::with_user().await;

    let response = app.request("GET", "/api/folders", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let bad = Creds {
        email: EMAIL,
        password: "wrong-password",
    };
    let response = app.request("GET", "/api/folders", None, Some(bad)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "INVALID_CREDENTIALS");

    let response = app.request("GET", "/api/folders", None, Some(USER)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_trims_email_before_checking_it() {
    let app = TestApp::new();
    let body = app.register("  Padded@X.com ", PASSWORD).await;
    assert_eq!(body["data"]["email"], "padded@x.com");

    let response = app
        .request(
            "POST",
            "/api/accounts/login",
            Some(serde_json::json!({ "email": "padded@x.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
