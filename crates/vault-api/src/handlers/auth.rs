//! Registration, login, and profile handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use vault_entity::user::User;
use vault_service::user::service::{
    AuthenticatedUser, LoginRequest as SvcLogin, RegisterRequest as SvcRegister,
};

use crate::dto::request::{LoginRequest, RegisterRequest, validate_body};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AuthenticatedUser>>)> {
    validate_body(&req)?;

    let authenticated = state
        .user_service
        .register(SvcRegister {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(authenticated))))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthenticatedUser>>> {
    validate_body(&req)?;

    let authenticated = state
        .user_service
        .login(SvcLogin {
            username: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(ApiResponse::ok(authenticated)))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<User>>> {
    let user = state.user_service.profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user)))
}
