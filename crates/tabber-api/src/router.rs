//! Route definitions for the Tabber HTTP API.
//!
//! All routes are mounted under `/api`. Tree routes take HTTP Basic
//! credentials on every request through the `AuthUser` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with all routes.
///
/// The store dump route is only mounted when `server.debug_routes` is set.
pub fn build_router(state: AppState) -> Router {
    let mut api_routes = Router::new()
        .merge(account_routes())
        .merge(folder_routes())
        .merge(conversation_routes())
        .merge(content_routes())
        .merge(health_routes());

    if state.config.server.debug_routes {
        api_routes = api_routes.merge(debug_routes());
    }

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Registration and login
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", post(handlers::account::register))
        .route("/accounts/login", post(handlers::account::login))
}

/// Folder listing, create, rename, delete
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_folders)
                .post(handlers::folder::create_folder)
                .delete(handlers::folder::delete_folder),
        )
        .route("/folders/rename", put(handlers::folder::rename_folder))
}

/// Conversation create, read, append, rename, delete
fn conversation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/conversations",
            get(handlers::conversation::get_conversation)
                .post(handlers::conversation::create_conversation)
                .delete(handlers::conversation::delete_conversation),
        )
        .route(
            "/conversations/messages",
            post(handlers::conversation::append_messages),
        )
        .route(
            "/conversations/rename",
            put(handlers::conversation::rename_conversation),
        )
}

/// The whole tree
fn content_routes() -> Router<AppState> {
    Router::new().route("/content", get(handlers::content::get_all_content))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

fn debug_routes() -> Router<AppState> {
    Router::new().route("/debug/dump", get(handlers::debug::dump))
}
