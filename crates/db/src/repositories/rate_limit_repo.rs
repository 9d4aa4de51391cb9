//! Repository for the shared `rate_limit_buckets` counters.

use chrono::{DateTime, Utc};
use sonaverse_core::rate_limit::{FixedWindow, WindowState};
use sonaverse_core::types::Timestamp;

use crate::DbPool;

pub struct RateLimitRepo;

impl RateLimitRepo {
    /// Consume one point for `key` and return the resulting window.
    ///
    /// A single upsert either opens a fresh window (missing or expired row)
    /// or increments the live one, so concurrent callers on any instance
    /// never lose an update.
    pub async fn consume(
        pool: &DbPool,
        key: &str,
        window: FixedWindow,
        now: Timestamp,
    ) -> Result<WindowState, sqlx::Error> {
        let now_ms = now.timestamp_millis();
        let fresh_reset_ms = now_ms + window.window_secs * 1000;

        let (consumed, resets_at_ms): (i64, i64) = sqlx::query_as(
            "INSERT INTO rate_limit_buckets (bucket_key, consumed, resets_at) VALUES (?1, 1, ?2) \
             ON CONFLICT (bucket_key) DO UPDATE SET \
                consumed = CASE WHEN resets_at <= ?3 THEN 1 ELSE consumed + 1 END, \
                resets_at = CASE WHEN resets_at <= ?3 THEN ?2 ELSE resets_at END \
             RETURNING consumed, resets_at",
        )
        .bind(key)
        .bind(fresh_reset_ms)
        .bind(now_ms)
        .fetch_one(pool)
        .await?;

        Ok(WindowState {
            consumed: u32::try_from(consumed).unwrap_or(u32::MAX),
            resets_at: DateTime::<Utc>::from_timestamp_millis(resets_at_ms).unwrap_or(now),
        })
    }

    /// Drop windows that closed before `now`. Returns the number removed.
    pub async fn purge_expired(pool: &DbPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rate_limit_buckets WHERE resets_at <= ?1")
            .bind(now.timestamp_millis())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
