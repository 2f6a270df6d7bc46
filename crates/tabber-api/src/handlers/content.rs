//! Whole-tree read handler.

use axum::Json;
use axum::extract::State;

use tabber_entity::ContentTree;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/content
pub async fn get_all_content(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ContentTree>>, ApiError> {
    let tree = state.tree_service.get_all_content(&auth).await?;
    Ok(Json(ApiResponse::ok(tree)))
}
