//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;
use tower::ServiceExt;

use tabber_core::config::AppConfig;
use tabber_database::{MemoryTreeStore, TreeStore};

/// Default credentials registered by [`TestApp::with_user`].
pub const EMAIL: &str = "a@x.com";
pub const PASSWORD: &str = "password123";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Store handle for direct inspection
    pub store: Arc<dyn TreeStore>,
}

/// Basic credentials for a request.
#[derive(Debug, Clone, Copy)]
pub struct Creds<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

pub const USER: Creds<'static> = Creds {
    email: EMAIL,
    password: PASSWORD,
};

impl TestApp {
    /// Create a new test application with cheap hashing.
    pub fn new() -> Self {
        Self::with_config("")
    }

    /// Create a test application from a TOML overlay.
    pub fn with_config(toml: &str) -> Self {
        let mut config = AppConfig::from_toml(toml).expect("Failed to parse test config");
        config.auth.argon2_memory_kib = 256;
        config.auth.argon2_iterations = 1;

        let store: Arc<dyn TreeStore> = Arc::new(MemoryTreeStore::new());
        let router =
            tabber_api::build_app(config, Arc::clone(&store)).expect("Failed to build app");
        Self { router, store }
    }

    /// Create a test application with [`USER`] registered.
    pub async fn with_user() -> Self {
        let app = Self::new();
        app.register(EMAIL, PASSWORD).await;
        app
    }

    /// Register an account and assert success.
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .request(
                "POST",
                "/api/accounts",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Registration failed: {:?}",
            response.body
        );
        response.body
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        creds: Option<Creds<'_>>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");

        if let Some(creds) = creds {
            let token = STANDARD.encode(format!("{}:{}", creds.email, creds.password));
            req = req.header("Authorization", format!("Basic {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// POST /api/folders as [`USER`].
    pub async fn add_folder(&self, path: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/folders",
            Some(serde_json::json!({ "path": path })),
            Some(USER),
        )
        .await
    }

    /// POST /api/conversations as [`USER`] with one message from `a`.
    pub async fn add_conversation(&self, path: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/conversations",
            Some(serde_json::json!({
                "path": path,
                "messages": [{ "author": "a", "content": ["hi"] }],
            })),
            Some(USER),
        )
        .await
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error envelope.
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
