//! Repository for the `history` and `history_items` tables.

use chrono::Utc;
use sonaverse_core::history::{HistoryPosition, DEFAULT_BADGE_COLOR, DEFAULT_TEXT_COLOR};
use sonaverse_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::history::{
    CreateHistory, History, HistoryItem, HistoryItemInput, HistoryWithItems, UpdateHistory,
};
use crate::DbPool;

const COLUMNS: &str = "\
    id, year, order_index, title_ko, title_en, subtitle_ko, subtitle_en, badge_color, \
    text_color, position, is_active, created_at, updated_at, deleted_at";

const ITEM_COLUMNS: &str = "id, history_id, text_ko, text_en, order_index";

pub struct HistoryRepo;

impl HistoryRepo {
    /// Public timeline: active, non-deleted entries by year then order.
    pub async fn list_public(pool: &DbPool) -> Result<Vec<HistoryWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history \
             WHERE is_active = 1 AND deleted_at IS NULL \
             ORDER BY year ASC, order_index ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, History>(&query).fetch_all(pool).await?;
        Self::with_items(pool, rows).await
    }

    /// Admin listing: every non-deleted entry, inactive ones included.
    pub async fn list_admin(pool: &DbPool) -> Result<Vec<HistoryWithItems>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM history WHERE deleted_at IS NULL \
             ORDER BY year ASC, order_index ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, History>(&query).fetch_all(pool).await?;
        Self::with_items(pool, rows).await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<HistoryWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM history WHERE id = ?1");
        let Some(history) = sqlx::query_as::<_, History>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };
        let items = Self::items_for(pool, id).await?;
        Ok(Some(HistoryWithItems { history, items }))
    }

    /// Insert an entry and its items. Input is validated by the caller;
    /// missing colors and position take their defaults.
    pub async fn create(pool: &DbPool, input: &CreateHistory) -> Result<HistoryWithItems, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO history (year, order_index, title_ko, title_en, subtitle_ko, subtitle_en, \
                                  badge_color, text_color, position, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11) \
             RETURNING {COLUMNS}"
        );
        let history = sqlx::query_as::<_, History>(&query)
            .bind(input.year)
            .bind(input.order.unwrap_or(0))
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.subtitle_ko)
            .bind(&input.subtitle_en)
            .bind(input.badge_color.as_deref().unwrap_or(DEFAULT_BADGE_COLOR))
            .bind(input.text_color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR))
            .bind(input.position.as_deref().unwrap_or(HistoryPosition::default().as_str()))
            .bind(input.is_active.unwrap_or(true))
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        let items = Self::replace_items(&mut *tx, history.id, &input.items).await?;
        tx.commit().await?;

        Ok(HistoryWithItems { history, items })
    }

    /// Patch an entry. When `items` is present every bullet item is replaced
    /// within the same transaction.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateHistory,
    ) -> Result<Option<HistoryWithItems>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE history SET \
                year = COALESCE(?2, year), \
                order_index = COALESCE(?3, order_index), \
                title_ko = COALESCE(?4, title_ko), \
                title_en = COALESCE(?5, title_en), \
                subtitle_ko = COALESCE(?6, subtitle_ko), \
                subtitle_en = COALESCE(?7, subtitle_en), \
                badge_color = COALESCE(?8, badge_color), \
                text_color = COALESCE(?9, text_color), \
                position = COALESCE(?10, position), \
                is_active = COALESCE(?11, is_active), \
                updated_at = ?12 \
             WHERE id = ?1 AND deleted_at IS NULL \
             RETURNING {COLUMNS}"
        );
        let Some(history) = sqlx::query_as::<_, History>(&query)
            .bind(id)
            .bind(input.year)
            .bind(input.order)
            .bind(&input.title_ko)
            .bind(&input.title_en)
            .bind(&input.subtitle_ko)
            .bind(&input.subtitle_en)
            .bind(&input.badge_color)
            .bind(&input.text_color)
            .bind(&input.position)
            .bind(input.is_active)
            .bind(Utc::now())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let items = match &input.items {
            Some(items) => Self::replace_items(&mut *tx, id, items).await?,
            None => {
                let query = format!(
                    "SELECT {ITEM_COLUMNS} FROM history_items WHERE history_id = ?1 \
                     ORDER BY order_index ASC, id ASC"
                );
                sqlx::query_as::<_, HistoryItem>(&query)
                    .bind(id)
                    .fetch_all(&mut *tx)
                    .await?
            }
        };
        tx.commit().await?;

        Ok(Some(HistoryWithItems { history, items }))
    }

    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE history SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn items_for(pool: &DbPool, history_id: DbId) -> Result<Vec<HistoryItem>, sqlx::Error> {
        let query = format!(
            "SELECT {ITEM_COLUMNS} FROM history_items WHERE history_id = ?1 \
             ORDER BY order_index ASC, id ASC"
        );
        sqlx::query_as::<_, HistoryItem>(&query)
            .bind(history_id)
            .fetch_all(pool)
            .await
    }

    async fn with_items(pool: &DbPool, rows: Vec<History>) -> Result<Vec<HistoryWithItems>, sqlx::Error> {
        let mut out = Vec::with_capacity(rows.len());
        for history in rows {
            let items = Self::items_for(pool, history.id).await?;
            out.push(HistoryWithItems { history, items });
        }
        Ok(out)
    }

    async fn replace_items(
        conn: &mut SqliteConnection,
        history_id: DbId,
        items: &[HistoryItemInput],
    ) -> Result<Vec<HistoryItem>, sqlx::Error> {
        sqlx::query("DELETE FROM history_items WHERE history_id = ?1")
            .bind(history_id)
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "INSERT INTO history_items (history_id, text_ko, text_en, order_index) \
             VALUES (?1, ?2, ?3, ?4) RETURNING {ITEM_COLUMNS}"
        );
        let mut inserted = Vec::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            let row = sqlx::query_as::<_, HistoryItem>(&query)
                .bind(history_id)
                .bind(&item.text_ko)
                .bind(&item.text_en)
                .bind(item.order.unwrap_or(position as i64))
                .fetch_one(&mut *conn)
                .await?;
            inserted.push(row);
        }
        inserted.sort_by_key(|item| (item.order_index, item.id));
        Ok(inserted)
    }
}
