//! Admin handlers for uploaded images.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::error::CoreError;
use sonaverse_core::types::DbId;
use sonaverse_db::models::image::{ImageListParams, UpdateImage};
use sonaverse_db::repositories::ImageRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAuth;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn image_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Image", id })
}

/// GET /api/admin/images
///
/// Active images only, newest first.
pub async fn list_images(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ImageListParams>,
) -> AppResult<impl IntoResponse> {
    let images = ImageRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::ok(images)))
}

/// GET /api/admin/images/{id}
///
/// Soft-deleted images are still returned, with their deletion state.
pub async fn get_image(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = ImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .ok_or_else(|| image_not_found(image_id))?;
    Ok(Json(DataResponse::ok(image)))
}

/// PUT /api/admin/images/{id}
pub async fn update_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
    Json(input): Json<UpdateImage>,
) -> AppResult<impl IntoResponse> {
    let image = ImageRepo::update(&state.pool, image_id, &input)
        .await?
        .ok_or_else(|| image_not_found(image_id))?;

    tracing::info!(image_id, user_id = user.user_id, "Image updated");
    Ok(Json(DataResponse::ok(image)))
}

/// DELETE /api/admin/images/{id}
///
/// Soft delete; the stored file is kept.
pub async fn delete_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ImageRepo::soft_delete(&state.pool, image_id).await? {
        return Err(image_not_found(image_id));
    }

    tracing::info!(image_id, user_id = user.user_id, "Image deleted");
    Ok(Json(MessageResponse::ok("이미지가 삭제되었습니다.")))
}
