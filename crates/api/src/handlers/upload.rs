//! Handler for `POST /api/upload`.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use sonaverse_core::error::CoreError;
use sonaverse_core::types::DbId;
use sonaverse_core::upload::{generate_filename, public_url, sanitize_folder, validate_upload};
use sonaverse_db::models::image::CreateImage;
use sonaverse_db::repositories::ImageRepo;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub id: DbId,
    pub url: String,
    pub filename: String,
    pub original_name: String,
    pub size: i64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

struct UploadedFile {
    original_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// POST /api/upload
///
/// Multipart fields: `file` (required) and `folder` (optional). The file is
/// written to `<UPLOAD_DIR>/<folder>/<generated name>` and recorded as an
/// image.
pub async fn upload_file(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file: Option<UploadedFile> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let original_name = field.file_name().unwrap_or("upload").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?.to_vec();
                file = Some(UploadedFile {
                    original_name,
                    mime_type,
                    bytes,
                });
            }
            Some("folder") => {
                folder = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("파일이 없습니다.".into()))?;
    validate_upload(&file.mime_type, file.bytes.len())?;

    let folder = sanitize_folder(folder.as_deref());
    let filename = generate_filename(&file.original_name, &file.mime_type, Utc::now(), Uuid::new_v4());

    let dir = state.config.upload_dir.join(&folder);
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
    let path = dir.join(&filename);
    tokio::fs::write(&path, &file.bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to write upload: {e}")))?;

    let created = ImageRepo::create(
        &state.pool,
        &CreateImage {
            url: public_url(&folder, &filename),
            filename,
            original_name: file.original_name,
            mime_type: file.mime_type,
            size_bytes: file.bytes.len() as i64,
            folder,
            uploaded_by: Some(user.user_id),
        },
    )
    .await;

    let image = match created {
        Ok(image) => image,
        Err(e) => {
            // No row points at the file.
            if let Err(remove_err) = tokio::fs::remove_file(&path).await {
                tracing::warn!(error = %remove_err, path = %path.display(), "Failed to remove orphaned upload");
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        image_id = image.id,
        user_id = user.user_id,
        size = image.size_bytes,
        url = %image.url,
        "File uploaded"
    );

    Ok(Json(DataResponse::ok(UploadResponse {
        id: image.id,
        url: image.url,
        filename: image.filename,
        original_name: image.original_name,
        size: image.size_bytes,
        mime_type: image.mime_type,
    })))
}

/// Body-limit overruns surface here while reading the field.
fn multipart_error(err: axum::extract::multipart::MultipartError) -> AppError {
    tracing::debug!(error = %err, "Rejected multipart body");
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::Core(CoreError::Validation(
            "파일 크기는 10MB를 초과할 수 없습니다.".into(),
        ));
    }
    AppError::BadRequest("잘못된 업로드 요청입니다.".into())
}
