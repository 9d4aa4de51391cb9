//! Repository for the `tags`, `tag_relations` and `content_tags` tables.
//!
//! Content attachment keeps `tags.usage_count` equal to the number of
//! attached, non-deleted press releases and stories. The attach/detach
//! helpers take a connection so callers run them inside the same
//! transaction as the content write.

use std::collections::BTreeSet;

use chrono::Utc;
use sonaverse_core::content::{ContentType, TagType};
use sonaverse_core::types::{DbId, Timestamp};
use sqlx::SqliteConnection;

use crate::models::tag::{CreateTag, Tag, TagDetail, UpdateTag};
use crate::DbPool;

const COLUMNS: &str = "id, name_ko, name_en, slug, tag_type, usage_count, created_at, updated_at";

pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// Insert a tag together with its related-tag links.
    pub async fn create(
        pool: &DbPool,
        input: &CreateTag,
        slug: &str,
        tag_type: TagType,
    ) -> Result<TagDetail, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tags (name_ko, name_en, slug, tag_type, usage_count, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5) \
             RETURNING {COLUMNS}"
        );
        let tag = sqlx::query_as::<_, Tag>(&query)
            .bind(input.name_ko.trim())
            .bind(input.name_en.as_deref().map(str::trim))
            .bind(slug)
            .bind(tag_type.as_str())
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        let related_tag_ids = Self::replace_related(&mut *tx, tag.id, &input.related_tag_ids).await?;
        tx.commit().await?;

        Ok(TagDetail { tag, related_tag_ids })
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = ?1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &DbPool, slug: &str) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE slug = ?1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(pool: &DbPool, id: DbId) -> Result<Option<TagDetail>, sqlx::Error> {
        let Some(tag) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let related_tag_ids = Self::related_ids(pool, id).await?;
        Ok(Some(TagDetail { tag, related_tag_ids }))
    }

    /// All tags, optionally of one type, most used first.
    pub async fn list(pool: &DbPool, tag_type: Option<TagType>) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tags \
             WHERE (?1 IS NULL OR tag_type = ?1) \
             ORDER BY usage_count DESC, name_ko ASC"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(tag_type.map(|t| t.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Patch a tag. `slug` and `tag_type` are already resolved by the caller.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateTag,
        slug: Option<&str>,
        tag_type: Option<TagType>,
    ) -> Result<Option<TagDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!(
            "UPDATE tags SET \
                name_ko = COALESCE(?2, name_ko), \
                name_en = COALESCE(?3, name_en), \
                slug = COALESCE(?4, slug), \
                tag_type = COALESCE(?5, tag_type), \
                updated_at = ?6 \
             WHERE id = ?1 \
             RETURNING {COLUMNS}"
        );
        let Some(tag) = sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(input.name_ko.as_deref().map(str::trim))
            .bind(input.name_en.as_deref().map(str::trim))
            .bind(slug)
            .bind(tag_type.map(|t| t.as_str()))
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let related_tag_ids = match &input.related_tag_ids {
            Some(ids) => Self::replace_related(&mut *tx, id, ids).await?,
            None => Self::related_ids(&mut *tx, id).await?,
        };
        tx.commit().await?;

        Ok(Some(TagDetail { tag, related_tag_ids }))
    }

    /// Hard delete. Content attachments and relations cascade.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Related tags
    // -----------------------------------------------------------------------

    pub async fn related_ids<'e, E>(executor: E, id: DbId) -> Result<Vec<DbId>, sqlx::Error>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        sqlx::query_scalar(
            "SELECT related_tag_id FROM tag_relations WHERE tag_id = ?1 ORDER BY related_tag_id",
        )
        .bind(id)
        .fetch_all(executor)
        .await
    }

    async fn replace_related(
        conn: &mut SqliteConnection,
        id: DbId,
        related: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query("DELETE FROM tag_relations WHERE tag_id = ?1")
            .bind(id)
            .execute(&mut *conn)
            .await?;

        let unique: BTreeSet<DbId> = related.iter().copied().filter(|r| *r != id).collect();
        for related_id in &unique {
            sqlx::query("INSERT INTO tag_relations (tag_id, related_tag_id) VALUES (?1, ?2)")
                .bind(id)
                .bind(related_id)
                .execute(&mut *conn)
                .await?;
        }
        Ok(unique.into_iter().collect())
    }

    // -----------------------------------------------------------------------
    // Content attachment
    // -----------------------------------------------------------------------

    /// Make the tag set of one content item exactly `tag_ids`, adjusting
    /// usage counts for every tag added or removed.
    pub async fn sync_content_tags(
        conn: &mut SqliteConnection,
        content_type: ContentType,
        content_id: DbId,
        tag_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let current: BTreeSet<DbId> = sqlx::query_scalar::<_, DbId>(
            "SELECT tag_id FROM content_tags WHERE content_type = ?1 AND content_id = ?2",
        )
        .bind(content_type.as_str())
        .bind(content_id)
        .fetch_all(&mut *conn)
        .await?
        .into_iter()
        .collect();
        let wanted: BTreeSet<DbId> = tag_ids.iter().copied().collect();

        let now = Utc::now();
        for removed in current.difference(&wanted) {
            sqlx::query(
                "DELETE FROM content_tags WHERE content_type = ?1 AND content_id = ?2 AND tag_id = ?3",
            )
            .bind(content_type.as_str())
            .bind(content_id)
            .bind(removed)
            .execute(&mut *conn)
            .await?;
            Self::adjust_usage(conn, *removed, -1, now).await?;
        }
        for added in wanted.difference(&current) {
            sqlx::query(
                "INSERT INTO content_tags (content_type, content_id, tag_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .bind(content_type.as_str())
            .bind(content_id)
            .bind(added)
            .bind(now)
            .execute(&mut *conn)
            .await?;
            Self::adjust_usage(conn, *added, 1, now).await?;
        }
        Ok(())
    }

    /// Detach every tag from a content item (used on soft delete).
    pub async fn detach_all(
        conn: &mut SqliteConnection,
        content_type: ContentType,
        content_id: DbId,
    ) -> Result<(), sqlx::Error> {
        Self::sync_content_tags(conn, content_type, content_id, &[]).await
    }

    /// Tags attached to one content item, by Korean name.
    pub async fn tags_for_content(
        pool: &DbPool,
        content_type: ContentType,
        content_id: DbId,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM tags t \
             JOIN content_tags ct ON ct.tag_id = t.id \
             WHERE ct.content_type = ?1 AND ct.content_id = ?2 \
             ORDER BY t.name_ko",
            prefixed_columns("t")
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(content_type.as_str())
            .bind(content_id)
            .fetch_all(pool)
            .await
    }

    async fn adjust_usage(
        conn: &mut SqliteConnection,
        tag_id: DbId,
        delta: i64,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE tags SET usage_count = MAX(usage_count + ?2, 0), updated_at = ?3 WHERE id = ?1",
        )
        .bind(tag_id)
        .bind(delta)
        .bind(now)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

fn prefixed_columns(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
