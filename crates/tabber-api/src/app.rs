//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};
use tower_http::trace::TraceLayer;

use tabber_core::config::AppConfig;
use tabber_core::result::AppResult;
use tabber_database::TreeStore;

use crate::middleware::cors::build_cors_layer;
use crate::middleware::logging::request_logging;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application over a store handle.
pub fn build_app(config: AppConfig, store: Arc<dyn TreeStore>) -> AppResult<Router> {
    let cors = build_cors_layer(&config.server.cors);
    let state = AppState::new(config, store)?;

    Ok(build_router(state)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}
