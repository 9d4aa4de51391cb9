use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rate_limit::RateLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference counted and everything else sits
/// behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: sonaverse_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Fixed-window limiter guarding login and inquiry submission.
    pub rate_limiter: Arc<RateLimiter>,
}
