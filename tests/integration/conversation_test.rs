//! Conversation routes over HTTP.

use axum::http::StatusCode;

use crate::helpers::{TestApp, USER};

#[tokio::test]
async fn test_create_and_get() {
    let app = TestApp::with_user().await;
    app.add_folder("Work").await;

    let created = app.add_conversation("Work/Standup").await;
    assert_eq!(created.status, StatusCode::CREATED);

    let response = app
        .request(
            "GET",
            "/api/conversations?path=Work/Standup",
            None,
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], created.body["data"]["id"]);
    assert_eq!(
        response.body["data"]["messages"],
        serde_json::json!([{ "author": "a", "content": ["hi"] }])
    );
}

#[tokio::test]
async fn test_create_without_messages() {
    let app = TestApp::with_user().await;
    let response = app
        .request(
            "POST",
            "/api/conversations",
            Some(serde_json::json!({ "path": "Empty" })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["messages"], serde_json::json!([]));
}

#[tokio::test]
async fn test_name_shared_with_folders() {
    let app = TestApp::with_user().await;
    app.add_folder("Notes").await;

    let response = app.add_conversation("Notes").await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    app.add_conversation("Chat").await;
    let response = app.add_folder("Chat").await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    // A conversation cannot hold children.
    let response = app.add_conversation("Chat/Inner").await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "WRONG_TYPE");
}

#[tokio::test]
async fn test_append_messages() {
    let app = TestApp::with_user().await;
    app.add_conversation("Chat").await;

    let response = app
        .request(
            "POST",
            "/api/conversations/messages",
            Some(serde_json::json!({
                "path": "Chat",
                "messages": [{ "author": "bot", "content": ["hello", "there"] }],
            })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let messages = response.body["data"]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1]["author"], "bot");

    let response = app
        .request(
            "POST",
            "/api/conversations/messages",
            Some(serde_json::json!({ "path": "Chat", "messages": [] })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_and_delete() {
    let app = TestApp::with_user().await;
    let created = app.add_conversation("Old").await;

    let response = app
        .request(
            "PUT",
            "/api/conversations/rename",
            Some(serde_json::json!({ "path": "Old", "new_name": "New" })),
            Some(USER),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], created.body["data"]["id"]);

    let response = app
        .request("GET", "/api/conversations?path=Old", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("DELETE", "/api/conversations?path=New", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", "/api/conversations?path=New", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_folder_is_not_a_conversation() {
    let app = TestApp::with_user().await;
    app.add_folder("Work").await;

    let response = app
        .request("GET", "/api/conversations?path=Work", None, Some(USER))
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), "WRONG_TYPE");
}

#[tokio::test]
async fn test_missing_path_query_uses_error_envelope() {
    let app = TestApp::with_user().await;

    for (method, uri) in [
        ("GET", "/api/conversations"),
        ("DELETE", "/api/conversations"),
        ("DELETE", "/api/folders"),
    ] {
        let response = app.request(method, uri, None, Some(USER)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{method} {uri}");
        assert_eq!(response.error_code(), "VALIDATION", "{method} {uri}");
        assert_eq!(response.body["success"], false);
    }
}
