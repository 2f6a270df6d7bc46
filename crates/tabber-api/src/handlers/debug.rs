//! Store dump for local testing. Only routed when `server.debug_routes`
//! is set.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use tabber_entity::StoreDump;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/debug/dump
pub async fn dump(State(state): State<AppState>) -> Result<Json<ApiResponse<StoreDump>>, ApiError> {
    let dump = state.store.dump().await?;
    warn!(
        users = dump.users.len(),
        folders = dump.folders.len(),
        conversations = dump.conversations.len(),
        "Store dump served"
    );
    Ok(Json(ApiResponse::ok(dump)))
}
