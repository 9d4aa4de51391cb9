use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use sonaverse_core::rate_limit::{FixedWindow, WindowState};
use sonaverse_core::types::Timestamp;

use super::RateLimitStore;
use crate::error::{AppError, AppResult};

/// Upper bound on tracked keys; least recently used keys go first.
pub const MAX_TRACKED_KEYS: u64 = 100_000;

/// Process-local counters in a TTL cache.
///
/// An entry lives one window past its last consumption, which is never
/// shorter than the window it holds, so eviction never forgets a live
/// budget. Expired windows still in the cache are replaced on the next
/// consumption for the same key.
pub struct MemoryRateLimitStore {
    buckets: Cache<String, WindowState>,
}

impl MemoryRateLimitStore {
    pub fn new(window: FixedWindow) -> Self {
        Self::with_ttl(Duration::from_secs(window.window_secs.max(1) as u64))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        let buckets = Cache::builder()
            .max_capacity(MAX_TRACKED_KEYS)
            .time_to_live(ttl)
            .build();
        Self { buckets }
    }

    /// Number of keys currently tracked, after running pending evictions.
    pub async fn tracked_keys(&self) -> u64 {
        self.buckets.run_pending_tasks().await;
        self.buckets.entry_count()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn consume(&self, key: &str, window: FixedWindow, now: Timestamp) -> AppResult<WindowState> {
        let result = self
            .buckets
            .entry(key.to_string())
            .and_compute_with(|current| {
                let (state, _) = window.consume(current.map(|entry| entry.into_value()), now);
                std::future::ready(Op::Put(state))
            })
            .await;

        match result {
            CompResult::Inserted(entry) | CompResult::ReplacedWith(entry) => Ok(entry.into_value()),
            _ => Err(AppError::InternalError(format!(
                "Rate limit bucket for '{key}' was not written"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn expired_keys_are_evicted() {
        let store = MemoryRateLimitStore::with_ttl(Duration::from_millis(50));
        let window = FixedWindow::default();
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        for i in 0..500 {
            store.consume(&format!("login:10.0.{}.{}", i / 256, i % 256), window, t0).await.unwrap();
        }
        assert_eq!(store.tracked_keys().await, 500);

        tokio::time::sleep(Duration::from_millis(150)).await;
        store.consume("login:10.9.9.9", window, t0).await.unwrap();
        assert_eq!(store.tracked_keys().await, 1);
    }

    #[tokio::test]
    async fn live_window_keeps_counting() {
        let window = FixedWindow::new(2, 60);
        let store = MemoryRateLimitStore::new(window);
        let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        assert_eq!(store.consume("k", window, t0).await.unwrap().consumed, 1);
        assert_eq!(store.consume("k", window, t0).await.unwrap().consumed, 2);
        assert_eq!(store.consume("k", window, t0).await.unwrap().consumed, 3);
    }
}
