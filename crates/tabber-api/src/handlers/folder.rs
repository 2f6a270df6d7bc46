//! Folder handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tabber_core::types::NodePath;

use crate::dto::request::{PathQuery, PathRequest, RenameRequest};
use crate::dto::response::{ApiResponse, FolderListResponse, FolderResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<FolderListResponse>>, ApiError> {
    let folders = state.tree_service.get_folders(&auth).await?;
    Ok(Json(ApiResponse::ok(FolderListResponse { folders })))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<PathRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FolderResponse>>), ApiError> {
    let path = NodePath::parse(&req.path)?;
    let folder = state.folder_service.add_folder(&auth, &path).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(FolderResponse::new(folder, &path))),
    ))
}

/// PUT /api/folders/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<FolderResponse>>, ApiError> {
    let path = NodePath::parse(&req.path)?;
    let folder = state
        .folder_service
        .rename_folder(&auth, &path, &req.new_name)
        .await?;

    let new_path = path
        .parent()
        .unwrap_or_default()
        .join(&req.new_name)?;
    Ok(Json(ApiResponse::ok(FolderResponse::new(folder, &new_path))))
}

/// DELETE /api/folders?path=...
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PathQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let path = NodePath::parse(&query.path)?;
    state.folder_service.delete_folder(&auth, &path).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Folder '{path}' deleted"
    )))))
}
