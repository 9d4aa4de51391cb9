//! Uploaded image asset model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::DeletionState;

/// A row from the `images` table.
///
/// Deleting an image only flips [`DeletionState`]; the row (and the file on
/// disk) stays so anything still pointing at it keeps resolving.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: DbId,
    pub url: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub folder: String,
    pub alt_ko: Option<String>,
    pub alt_en: Option<String>,
    pub uploaded_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at")]
    pub deletion: DeletionState,
}

/// DTO for recording a stored upload.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub url: String,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size_bytes: i64,
    pub folder: String,
    pub uploaded_by: Option<DbId>,
}

/// DTO for updating alt text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateImage {
    pub alt_ko: Option<String>,
    pub alt_en: Option<String>,
}

/// Query parameters for `GET /api/admin/images`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageListParams {
    pub folder: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
