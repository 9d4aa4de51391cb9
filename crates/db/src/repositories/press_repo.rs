//! Repository for the `press_releases` table.
//!
//! Tag attachments live in `content_tags` under [`ContentType::Press`]; every
//! write that changes them runs in one transaction with the row write so
//! usage counts never drift.

use chrono::Utc;
use sonaverse_core::content::ContentType;
use sonaverse_core::types::DbId;

use crate::models::press::{CreatePress, PressRelease, PressWithTags, UpdatePress};
use crate::repositories::TagRepo;
use crate::DbPool;

const COLUMNS: &str = "\
    id, slug, press_name_ko, press_name_en, title_ko, title_en, summary_ko, summary_en, \
    body_ko, body_en, external_url, thumbnail_url, published_at, is_published, is_active, \
    created_by, created_at, updated_at, deleted_at";

const PUBLIC_FILTER: &str = "\
    is_published = 1 AND is_active = 1 AND deleted_at IS NULL \
    AND (?1 IS NULL OR id IN ( \
        SELECT ct.content_id FROM content_tags ct JOIN tags t ON t.id = ct.tag_id \
        WHERE ct.content_type = 'press' AND t.slug = ?1))";

pub struct PressRepo;

impl PressRepo {
    /// Published releases, newest first, with the total match count.
    pub async fn list_public(
        pool: &DbPool,
        tag_slug: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PressWithTags>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_releases WHERE {PUBLIC_FILTER} \
             ORDER BY published_at DESC, id DESC LIMIT ?2 OFFSET ?3"
        );
        let rows = sqlx::query_as::<_, PressRelease>(&query)
            .bind(tag_slug)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count = format!("SELECT COUNT(*) FROM press_releases WHERE {PUBLIC_FILTER}");
        let total: i64 = sqlx::query_scalar(&count).bind(tag_slug).fetch_one(pool).await?;

        Ok((Self::with_tags(pool, rows).await?, total))
    }

    /// Admin listing: every non-deleted release regardless of publish state.
    pub async fn list_admin(
        pool: &DbPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PressWithTags>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_releases WHERE deleted_at IS NULL \
             ORDER BY published_at DESC, id DESC LIMIT ?1 OFFSET ?2"
        );
        let rows = sqlx::query_as::<_, PressRelease>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM press_releases WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;
        Ok((Self::with_tags(pool, rows).await?, total))
    }

    /// Public detail lookup.
    pub async fn find_public_by_slug(pool: &DbPool, slug: &str) -> Result<Option<PressWithTags>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM press_releases \
             WHERE slug = ?1 AND is_published = 1 AND is_active = 1 AND deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, PressRelease>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(press) => Ok(Some(Self::attach_tags(pool, press).await?)),
            None => Ok(None),
        }
    }

    /// Find by id, soft-deleted rows included.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<PressWithTags>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM press_releases WHERE id = ?1");
        let row = sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(press) => Ok(Some(Self::attach_tags(pool, press).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(
        pool: &DbPool,
        input: &CreatePress,
        slug: &str,
        created_by: Option<DbId>,
    ) -> Result<PressWithTags, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO press_releases (slug, press_name_ko, press_name_en, title_ko, title_en, \
                                         summary_ko, summary_en, body_ko, body_en, external_url, \
                                         thumbnail_url, published_at, is_published, is_active, \
                                         created_by, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?16) \
             RETURNING {COLUMNS}"
        );
        let press = sqlx::query_as::<_, PressRelease>(&query)
            .bind(slug)
            .bind(&input.press_name_ko)
            .bind(&input.press_name_en)
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.summary_ko)
            .bind(&input.summary_en)
            .bind(&input.body_ko)
            .bind(&input.body_en)
            .bind(&input.external_url)
            .bind(&input.thumbnail_url)
            .bind(input.published_at.unwrap_or(now))
            .bind(input.is_published)
            .bind(input.is_active.unwrap_or(true))
            .bind(created_by)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        TagRepo::sync_content_tags(&mut *tx, ContentType::Press, press.id, &input.tag_ids).await?;
        tx.commit().await?;

        Self::attach_tags(pool, press).await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdatePress,
        slug: Option<&str>,
    ) -> Result<Option<PressWithTags>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE press_releases SET \
                slug = COALESCE(?2, slug), \
                press_name_ko = COALESCE(?3, press_name_ko), \
                press_name_en = COALESCE(?4, press_name_en), \
                title_ko = COALESCE(?5, title_ko), \
                title_en = COALESCE(?6, title_en), \
                summary_ko = COALESCE(?7, summary_ko), \
                summary_en = COALESCE(?8, summary_en), \
                body_ko = COALESCE(?9, body_ko), \
                body_en = COALESCE(?10, body_en), \
                external_url = COALESCE(?11, external_url), \
                thumbnail_url = COALESCE(?12, thumbnail_url), \
                published_at = COALESCE(?13, published_at), \
                is_published = COALESCE(?14, is_published), \
                is_active = COALESCE(?15, is_active), \
                updated_at = ?16 \
             WHERE id = ?1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let Some(press) = sqlx::query_as::<_, PressRelease>(&query)
            .bind(id)
            .bind(slug)
            .bind(&input.press_name_ko)
            .bind(&input.press_name_en)
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.summary_ko)
            .bind(&input.summary_en)
            .bind(&input.body_ko)
            .bind(&input.body_en)
            .bind(&input.external_url)
            .bind(&input.thumbnail_url)
            .bind(input.published_at)
            .bind(input.is_published)
            .bind(input.is_active)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tag_ids {
            TagRepo::sync_content_tags(&mut *tx, ContentType::Press, id, tag_ids).await?;
        }
        tx.commit().await?;

        Ok(Some(Self::attach_tags(pool, press).await?))
    }

    /// Soft delete and release the tag usage the release held.
    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        let result = sqlx::query(
            "UPDATE press_releases SET deleted_at = ?2, updated_at = ?2 \
             WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        TagRepo::detach_all(&mut *tx, ContentType::Press, id).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn attach_tags(pool: &DbPool, press: PressRelease) -> Result<PressWithTags, sqlx::Error> {
        let tags = TagRepo::tags_for_content(pool, ContentType::Press, press.id).await?;
        Ok(PressWithTags { press, tags })
    }

    async fn with_tags(pool: &DbPool, rows: Vec<PressRelease>) -> Result<Vec<PressWithTags>, sqlx::Error> {
        let mut out = Vec::with_capacity(rows.len());
        for press in rows {
            out.push(Self::attach_tags(pool, press).await?);
        }
        Ok(out)
    }
}
