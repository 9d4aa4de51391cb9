//! Repository for the `images` table.

use chrono::Utc;
use sonaverse_core::types::DbId;

use crate::models::image::{CreateImage, Image, ImageListParams, UpdateImage};
use crate::DbPool;

const COLUMNS: &str = "\
    id, url, filename, original_name, mime_type, size_bytes, folder, alt_ko, alt_en, \
    uploaded_by, created_at, updated_at, deleted_at";

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub struct ImageRepo;

impl ImageRepo {
    pub async fn create(pool: &DbPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (url, filename, original_name, mime_type, size_bytes, folder, \
                                 uploaded_by, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(&input.url)
            .bind(&input.filename)
            .bind(&input.original_name)
            .bind(&input.mime_type)
            .bind(input.size_bytes)
            .bind(&input.folder)
            .bind(input.uploaded_by)
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find by id, soft-deleted rows included.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ?1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active images, newest first.
    pub async fn list(pool: &DbPool, params: &ImageListParams) -> Result<Vec<Image>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = params.offset.unwrap_or(0).max(0);
        let query = format!(
            "SELECT {COLUMNS} FROM images \
             WHERE deleted_at IS NULL AND (?1 IS NULL OR folder = ?1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT ?2 OFFSET ?3"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(params.folder.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update alt text of an active image.
    pub async fn update(pool: &DbPool, id: DbId, input: &UpdateImage) -> Result<Option<Image>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET \
                alt_ko = COALESCE(?2, alt_ko), \
                alt_en = COALESCE(?3, alt_en), \
                updated_at = ?4 \
             WHERE id = ?1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .bind(&input.alt_ko)
            .bind(&input.alt_en)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Mark an image deleted. Returns `false` if missing or already deleted.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE images SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
