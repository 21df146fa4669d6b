//! Image handlers: browse, upload, search, rename/move, delete.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use bytes::Bytes;
use uuid::Uuid;

use vault_core::error::AppError;
use vault_entity::image::{Image, UpdateImage};
use vault_service::image::service::UploadRequest;

use crate::dto::request::{SearchParams, UpdateImageRequest};
use crate::error::ApiResult;
use crate::dto::response::{ApiResponse, ListResponse, MessageResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/images
pub async fn list_recent(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ListResponse<Image>>> {
    let images = state.image_service.list_recent(&auth).await?;
    Ok(Json(ListResponse::ok(images)))
}

/// GET /api/v1/images/{id}
pub async fn get_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<Image>>> {
    let image = state.image_service.get_image(&auth, id).await?;
    Ok(Json(ApiResponse::ok(image)))
}

/// GET /api/v1/images/search?q=...
pub async fn search_images(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<ListResponse<Image>>> {
    let images = state.image_service.search(&auth, &params.q).await?;
    Ok(Json(ListResponse::ok(images)))
}

/// POST /api/v1/images
///
/// `multipart/form-data` with a required `file` part and optional `name`
/// and `folder_id` text parts.
pub async fn upload_image(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ApiResponse<Image>>)> {
    let mut data: Option<Bytes> = None;
    let mut filename: Option<String> = None;
    let mut name: Option<String> = None;
    let mut folder_id: Option<Uuid> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                filename = field.file_name().map(String::from);
                data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "name" => {
                name = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            "folder_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if !text.is_empty() {
                    folder_id = Some(
                        Uuid::parse_str(&text)
                            .map_err(|_| AppError::validation("Invalid folder_id"))?,
                    );
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("Please upload a file"))?;

    let image = state
        .image_service
        .upload(
            &auth,
            UploadRequest {
                data,
                filename: filename.unwrap_or_else(|| "upload".to_string()),
                name,
                folder_id,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(image))))
}

/// PUT /api/v1/images/{id}
pub async fn update_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateImageRequest>,
) -> ApiResult<Json<ApiResponse<Image>>> {
    let image = state
        .image_service
        .update_image(
            &auth,
            id,
            UpdateImage {
                name: req.name,
                folder_id: req.folder_id,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(image)))
}

/// DELETE /api/v1/images/{id}
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<ApiResponse<MessageResponse>>> {
    state.image_service.delete_image(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Image deleted".to_string(),
    })))
}
