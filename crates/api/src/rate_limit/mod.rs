//! Per-client fixed-window rate limiting.
//!
//! [`RateLimiter`] owns the budget ([`FixedWindow`]) and delegates counter
//! storage to a [`RateLimitStore`]. The database store is shared across
//! instances; the memory store is process-local and used in tests.

mod memory;
mod sql;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sonaverse_core::error::CoreError;
use sonaverse_core::rate_limit::{FixedWindow, RateLimitDecision, WindowState};
use sonaverse_core::types::Timestamp;
use sonaverse_db::DbPool;

use crate::error::{AppError, AppResult};

pub use memory::MemoryRateLimitStore;
pub use sql::SqlRateLimitStore;

/// Operations that consume from a client's budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitScope {
    Login,
    Inquiry,
}

impl RateLimitScope {
    pub fn key(self, ip: &str) -> String {
        let prefix = match self {
            RateLimitScope::Login => "login",
            RateLimitScope::Inquiry => "inquiry",
        };
        format!("{prefix}:{ip}")
    }
}

/// Storage seam for window counters.
///
/// `consume` must be atomic per key: it opens a fresh window when none is
/// live at `now`, otherwise increments the live one.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn consume(&self, key: &str, window: FixedWindow, now: Timestamp) -> AppResult<WindowState>;
}

pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    window: FixedWindow,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, window: FixedWindow) -> Self {
        Self { store, window }
    }

    /// Process-local limiter with the default budget.
    pub fn memory() -> Self {
        Self::memory_with(FixedWindow::default())
    }

    pub fn memory_with(window: FixedWindow) -> Self {
        Self::new(Arc::new(MemoryRateLimitStore::new(window)), window)
    }

    /// Limiter backed by the shared `rate_limit_buckets` table.
    pub fn database(pool: DbPool) -> Self {
        Self::new(Arc::new(SqlRateLimitStore::new(pool)), FixedWindow::default())
    }

    pub fn window(&self) -> FixedWindow {
        self.window
    }

    /// Consume one point for `key` and report the outcome.
    pub async fn check_rate_limit(&self, key: &str) -> AppResult<RateLimitDecision> {
        self.check_at(key, Utc::now()).await
    }

    pub async fn check_at(&self, key: &str, now: Timestamp) -> AppResult<RateLimitDecision> {
        let state = self.store.consume(key, self.window, now).await?;
        Ok(self.window.decide(state))
    }

    /// Consume one point for `scope` and client `ip`, failing with
    /// [`CoreError::RateLimited`] once the budget is exhausted.
    pub async fn enforce(&self, scope: RateLimitScope, ip: &str) -> AppResult<RateLimitDecision> {
        let now = Utc::now();
        let decision = self.check_at(&scope.key(ip), now).await?;
        if !decision.allowed {
            tracing::warn!(?scope, ip, reset_time = %decision.reset_time, "Rate limit exceeded");
            return Err(AppError::Core(CoreError::RateLimited {
                retry_after_secs: decision.retry_after_secs(now),
            }));
        }
        Ok(decision)
    }
}
