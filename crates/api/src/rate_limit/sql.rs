use async_trait::async_trait;
use sonaverse_core::rate_limit::{FixedWindow, WindowState};
use sonaverse_core::types::Timestamp;
use sonaverse_db::repositories::RateLimitRepo;
use sonaverse_db::DbPool;

use super::RateLimitStore;
use crate::error::AppResult;

/// Counters in the `rate_limit_buckets` table, shared by every instance
/// using the same database.
pub struct SqlRateLimitStore {
    pool: DbPool,
}

impl SqlRateLimitStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RateLimitStore for SqlRateLimitStore {
    async fn consume(&self, key: &str, window: FixedWindow, now: Timestamp) -> AppResult<WindowState> {
        Ok(RateLimitRepo::consume(&self.pool, key, window, now).await?)
    }
}
