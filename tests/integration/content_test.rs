//! Whole-tree reads over HTTP.

use axum::http::StatusCode;

use crate::helpers::{TestApp, USER};

#[tokio::test]
async fn test_example_scenario() {
    let app = TestApp::with_user().await;

    assert_eq!(app.add_folder("Work").await.status, StatusCode::CREATED);
    assert_eq!(app.add_folder("Work").await.status, StatusCode::CONFLICT);
    assert_eq!(
        app.add_conversation("Work/Standup").await.status,
        StatusCode::CREATED
    );

    let response = app.request("GET", "/api/content", None, Some(USER)).await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["total_folders"], 1);
    assert_eq!(data["total_conversations"], 1);

    let folders = data["root"]["folders"].as_array().unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0]["name"], "Work");

    let conversations = folders[0]["conversations"].as_array().unwrap();
    assert_eq!(conversations.len(), 1);
    assert_eq!(conversations[0]["name"], "Standup");
    assert_eq!(
        conversations[0]["messages"],
        serde_json::json!([{ "author": "a", "content": ["hi"] }])
    );
}

#[tokio::test]
async fn test_content_after_changes() {
    let app = TestApp::with_user().await;
    app.add_folder("A").await;
    app.add_folder("A/B").await;
    app.add_conversation("A/B/Chat").await;
    app.add_conversation("Loose").await;

    app.request(
        "PUT",
        "/api/folders/rename",
        Some(serde_json::json!({ "path": "A/B", "new_name": "C" })),
        Some(USER),
    )
    .await;
    app.request("DELETE", "/api/conversations?path=Loose", None, Some(USER))
        .await;

    let response = app.request("GET", "/api/content", None, Some(USER)).await;
    let root = &response.body["data"]["root"];
    assert_eq!(root["conversations"], serde_json::json!([]));
    let c = &root["folders"][0]["folders"][0];
    assert_eq!(c["name"], "C");
    assert_eq!(c["conversations"][0]["name"], "Chat");
}
