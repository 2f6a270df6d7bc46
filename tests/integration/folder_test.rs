//! Folder routes over HTTP.

use axum::http::StatusCode;
use tabber_database::TreeStore;

use crate::helpers::{Creds, PASSWORD, TestApp, USER};

#[tokio::test]
async fn test_create_and_list() {
    let app = TestApp::with_user().await;

    let response = app.add_folder("Work").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], "Work");
    assert_eq!(response.body["data"]["path"], "Work");

    assert_eq!(app.add_folder("Work/2024").await.status, StatusCode::CREATED);
    assert_eq!(app.add_folder("Home").await.status, StatusCode::CREATED);

    let response = app.request("GET", "/api/folders", None, Some(USER)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["data"]["folders"],
        serde_json::json!(["Work", "2024", "Home"])
    );
}

#[tokio::test]
async fn test_create_errors() {
    let app = TestApp::with_user().await;
    app.add_folder("Work").await;

    let response = app.add_folder("Work").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "ALREADY_EXISTS");

    let response = app.add_folder("Missing/Child").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    for malformed in ["/Work", "Work/", "a//b", ""] {
        let response = app.add_folder(malformed).await;
        assert_eq!(
            response.status,
            StatusCode::BAD_REQUEST,
            "path {malformed:?} should be rejected"
        );
        assert_eq!(response.error_code(), "MALFORMED_PATH");
    }
}

#[tokio::test]
async fn test_rename() {
    let app = TestApp::with_user().await;
    let created = app.add_folder("Old").await;
    app.add_folder("Taken").await;

    let response = app
        .request(
            "PUT",
            "/api/folders/rename",
            Some(serde_json::json!({ "path": "Old", "new_name": "Taken" })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "PUT",
            "/api/folders/rename",
            Some(serde_json::json!({ "path": "Old", "new_name": "New" })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], created.body["data"]["id"]);
    assert_eq!(response.body["data"]["path"], "New");

    let response = app
        .request(
            "PUT",
            "/api/folders/rename",
            Some(serde_json::json!({ "path": "", "new_name": "Top" })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete() {
    let app = TestApp::with_user().await;
    app.add_folder("A").await;
    app.add_folder("A/B").await;
    app.add_conversation("A/B/Chat").await;

    let response = app
        .request("DELETE", "/api/folders?path=A", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("DELETE", "/api/folders?path=A", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", "/api/folders?path=", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let dump = app.store.dump().await.unwrap();
    assert_eq!(dump.folders.len(), 1);
    assert!(dump.conversations.is_empty());
}

#[tokio::test]
async fn test_non_cascading_delete() {
    let app = TestApp::with_config("[tree]\ncascade_delete = false\n");
    app.register("a@x.com", PASSWORD).await;
    app.add_folder("A").await;
    app.add_folder("A/B").await;

    let response = app
        .request("DELETE", "/api/folders?path=A", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "NOT_EMPTY");
}

#[tokio::test]
async fn test_trees_are_private() {
    let app = TestApp::with_user().await;
    app.add_folder("Secret").await;
    app.register("b@x.com", PASSWORD).await;
    let other = Creds {
        email: "b@x.com",
        password: PASSWORD,
    };

    let response = app.request("GET", "/api/folders", None, Some(other)).await;
    assert_eq!(response.body["data"]["folders"], serde_json::json!([]));

    let response = app
        .request("DELETE", "/api/folders?path=Secret", None, Some(other))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The same name is free in the other tree.
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "path": "Secret" })),
            Some(other),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
}
