//! Folder CRUD handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use vault_entity::folder::{Folder, UpdateFolder};
use vault_entity::image::Image;
use vault_service::folder::service::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{CreateFolderRequest, UpdateFolderRequest, validate_body};
use crate::dto::response::{ApiResponse, ListResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ListResponse<Folder>>> {
    let folders = state.folder_service.list_folders(&auth).await?;
    Ok(Json(ListResponse::ok(folders)))
}

/// GET /api/v1/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(folder)))
}

/// GET /api/v1/folders/{id}/images
pub async fn list_folder_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ListResponse<Image>>> {
    let images = state.image_service.list_in_folder(&auth, id).await?;
    Ok(Json(ListResponse::ok(images)))
}

/// POST /api/v1/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Folder>>)> {
    validate_body(&req)?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(folder))))
}

/// PUT /api/v1/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderRequest>,
) -> ApiResult<Json<ApiResponse<Folder>>> {
    let folder = state
        .folder_service
        .update_folder(
            &auth,
            id,
            UpdateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(folder)))
}

/// DELETE /api/v1/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Folder deleted".to_string(),
    })))
}
