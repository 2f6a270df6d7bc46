//! Conversation handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tabber_core::types::NodePath;

use crate::dto::request::{
    AppendMessagesRequest, CreateConversationRequest, PathQuery, RenameRequest,
};
use crate::dto::response::{ApiResponse, ConversationResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidatedJson, ValidatedQuery};
use crate::state::AppState;

/// POST /api/conversations
pub async fn create_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<CreateConversationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ConversationResponse>>), ApiError> {
    let path = NodePath::parse(&req.path)?;
    let conversation = state
        .conversation_service
        .add_conversation(&auth, &path, req.messages)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(ConversationResponse::new(conversation, &path))),
    ))
}

/// GET /api/conversations?path=...
pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PathQuery>,
) -> Result<Json<ApiResponse<ConversationResponse>>, ApiError> {
    let path = NodePath::parse(&query.path)?;
    let conversation = state
        .conversation_service
        .get_conversation(&auth, &path)
        .await?;
    Ok(Json(ApiResponse::ok(ConversationResponse::new(
        conversation,
        &path,
    ))))
}

/// POST /api/conversations/messages
pub async fn append_messages(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<AppendMessagesRequest>,
) -> Result<Json<ApiResponse<ConversationResponse>>, ApiError> {
    let path = NodePath::parse(&req.path)?;
    let conversation = state
        .conversation_service
        .append_messages(&auth, &path, req.messages)
        .await?;
    Ok(Json(ApiResponse::ok(ConversationResponse::new(
        conversation,
        &path,
    ))))
}

/// PUT /api/conversations/rename
pub async fn rename_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<RenameRequest>,
) -> Result<Json<ApiResponse<ConversationResponse>>, ApiError> {
    let path = NodePath::parse(&req.path)?;
    let conversation = state
        .conversation_service
        .rename_conversation(&auth, &path, &req.new_name)
        .await?;

    let new_path = path
        .parent()
        .unwrap_or_default()
        .join(&req.new_name)?;
    Ok(Json(ApiResponse::ok(ConversationResponse::new(
        conversation,
        &new_path,
    ))))
}

/// DELETE /api/conversations?path=...
pub async fn delete_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedQuery(query): ValidatedQuery<PathQuery>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let path = NodePath::parse(&query.path)?;
    state
        .conversation_service
        .delete_conversation(&auth, &path)
        .await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new(format!(
        "Conversation '{path}' deleted"
    )))))
}
