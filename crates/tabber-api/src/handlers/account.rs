//! Registration and login handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/accounts
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let user = state
        .account_service
        .register(&req.email, &req.password)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(UserResponse::from(user)))))
}

/// POST /api/accounts/login
///
/// Checks credentials without opening a session; tree routes take the
/// same credentials on every request.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .account_service
        .authenticate(&req.email, &req.password)
        .await?;
    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
