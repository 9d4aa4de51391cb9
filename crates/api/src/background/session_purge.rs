//! Periodic cleanup of dead admin sessions and closed rate-limit windows.

use std::time::Duration;

use chrono::Utc;
use sonaverse_db::repositories::{AdminSessionRepo, RateLimitRepo};
use sonaverse_db::DbPool;
use tokio_util::sync::CancellationToken;

/// Shortest accepted purge interval.
pub const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Run the purge loop every `interval` (at least [`MIN_INTERVAL`]) until
/// `cancel` is triggered.
///
/// The first pass runs immediately on start.
pub async fn run(pool: DbPool, interval: Duration, cancel: CancellationToken) {
    let interval = interval.max(MIN_INTERVAL);
    tracing::info!(interval_secs = interval.as_secs(), "Session purge job started");

    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session purge job stopping");
                break;
            }
            _ = ticker.tick() => purge_once(&pool).await,
        }
    }
}

/// One purge pass. Failures are logged and retried on the next tick.
pub async fn purge_once(pool: &DbPool) {
    let now = Utc::now();

    match AdminSessionRepo::purge_expired(pool, now).await {
        Ok(0) => tracing::debug!("Session purge: no sessions to remove"),
        Ok(deleted) => tracing::info!(deleted, "Session purge: removed dead sessions"),
        Err(e) => tracing::error!(error = %e, "Session purge: session cleanup failed"),
    }

    match RateLimitRepo::purge_expired(pool, now).await {
        Ok(0) => {}
        Ok(deleted) => tracing::debug!(deleted, "Session purge: removed closed rate-limit windows"),
        Err(e) => tracing::error!(error = %e, "Session purge: rate-limit cleanup failed"),
    }
}
