//! Repository for the `stories` table.

use chrono::Utc;
use sonaverse_core::content::ContentType;
use sonaverse_core::types::DbId;

use crate::models::story::{CreateStory, Story, StoryWithTags, UpdateStory};
use crate::repositories::TagRepo;
use crate::DbPool;

const COLUMNS: &str = "\
    id, slug, title_ko, title_en, summary_ko, summary_en, body_ko, body_en, thumbnail_url, \
    youtube_url, is_main, is_published, published_at, created_by, created_at, updated_at, deleted_at";

const PUBLIC_FILTER: &str = "\
    is_published = 1 AND deleted_at IS NULL \
    AND (?1 IS NULL OR id IN ( \
        SELECT ct.content_id FROM content_tags ct JOIN tags t ON t.id = ct.tag_id \
        WHERE ct.content_type = 'story' AND t.slug = ?1)) \
    AND (?2 = 0 OR is_main = 1)";

pub struct StoryRepo;

impl StoryRepo {
    /// Published stories, newest first, with the total match count.
    /// `main_only` restricts the listing to featured stories.
    pub async fn list_public(
        pool: &DbPool,
        tag_slug: Option<&str>,
        main_only: bool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StoryWithTags>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories WHERE {PUBLIC_FILTER} \
             ORDER BY published_at DESC, id DESC LIMIT ?3 OFFSET ?4"
        );
        let rows = sqlx::query_as::<_, Story>(&query)
            .bind(tag_slug)
            .bind(main_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count = format!("SELECT COUNT(*) FROM stories WHERE {PUBLIC_FILTER}");
        let total: i64 = sqlx::query_scalar(&count)
            .bind(tag_slug)
            .bind(main_only)
            .fetch_one(pool)
            .await?;

        Ok((Self::with_tags(pool, rows).await?, total))
    }

    pub async fn list_admin(
        pool: &DbPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<StoryWithTags>, i64), sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories WHERE deleted_at IS NULL \
             ORDER BY published_at DESC, id DESC LIMIT ?1 OFFSET ?2"
        );
        let rows = sqlx::query_as::<_, Story>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stories WHERE deleted_at IS NULL")
            .fetch_one(pool)
            .await?;
        Ok((Self::with_tags(pool, rows).await?, total))
    }

    pub async fn find_public_by_slug(pool: &DbPool, slug: &str) -> Result<Option<StoryWithTags>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM stories WHERE slug = ?1 AND is_published = 1 AND deleted_at IS NULL"
        );
        let row = sqlx::query_as::<_, Story>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(story) => Ok(Some(Self::attach_tags(pool, story).await?)),
            None => Ok(None),
        }
    }

    /// Find by id, soft-deleted rows included.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<StoryWithTags>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stories WHERE id = ?1");
        let row = sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(story) => Ok(Some(Self::attach_tags(pool, story).await?)),
            None => Ok(None),
        }
    }

    pub async fn create(
        pool: &DbPool,
        input: &CreateStory,
        slug: &str,
        created_by: Option<DbId>,
    ) -> Result<StoryWithTags, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO stories (slug, title_ko, title_en, summary_ko, summary_en, body_ko, body_en, \
                                  thumbnail_url, youtube_url, is_main, is_published, published_at, \
                                  created_by, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14) \
             RETURNING {COLUMNS}"
        );
        let story = sqlx::query_as::<_, Story>(&query)
            .bind(slug)
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.summary_ko)
            .bind(&input.summary_en)
            .bind(&input.body_ko)
            .bind(&input.body_en)
            .bind(&input.thumbnail_url)
            .bind(&input.youtube_url)
            .bind(input.is_main)
            .bind(input.is_published)
            .bind(input.published_at.unwrap_or(now))
            .bind(created_by)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        TagRepo::sync_content_tags(&mut *tx, ContentType::Story, story.id, &input.tag_ids).await?;
        tx.commit().await?;

        Self::attach_tags(pool, story).await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateStory,
        slug: Option<&str>,
    ) -> Result<Option<StoryWithTags>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE stories SET \
                slug = COALESCE(?2, slug), \
                title_ko = COALESCE(?3, title_ko), \
                title_en = COALESCE(?4, title_en), \
                summary_ko = COALESCE(?5, summary_ko), \
                summary_en = COALESCE(?6, summary_en), \
                body_ko = COALESCE(?7, body_ko), \
                body_en = COALESCE(?8, body_en), \
                thumbnail_url = COALESCE(?9, thumbnail_url), \
                youtube_url = COALESCE(?10, youtube_url), \
                is_main = COALESCE(?11, is_main), \
                is_published = COALESCE(?12, is_published), \
                published_at = COALESCE(?13, published_at), \
                updated_at = ?14 \
             WHERE id = ?1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let Some(story) = sqlx::query_as::<_, Story>(&query)
            .bind(id)
            .bind(slug)
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.summary_ko)
            .bind(&input.summary_en)
            .bind(&input.body_ko)
            .bind(&input.body_en)
            .bind(&input.thumbnail_url)
            .bind(&input.youtube_url)
            .bind(input.is_main)
            .bind(input.is_published)
            .bind(input.published_at)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        if let Some(tag_ids) = &input.tag_ids {
            TagRepo::sync_content_tags(&mut *tx, ContentType::Story, id, tag_ids).await?;
        }
        tx.commit().await?;

        Ok(Some(Self::attach_tags(pool, story).await?))
    }

    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        let result = sqlx::query(
            "UPDATE stories SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(false);
        }
        TagRepo::detach_all(&mut *tx, ContentType::Story, id).await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn attach_tags(pool: &DbPool, story: Story) -> Result<StoryWithTags, sqlx::Error> {
        let tags = TagRepo::tags_for_content(pool, ContentType::Story, story.id).await?;
        Ok(StoryWithTags { story, tags })
    }

    async fn with_tags(pool: &DbPool, rows: Vec<Story>) -> Result<Vec<StoryWithTags>, sqlx::Error> {
        let mut out = Vec::with_capacity(rows.len());
        for story in rows {
            out.push(Self::attach_tags(pool, story).await?);
        }
        Ok(out)
    }
}
