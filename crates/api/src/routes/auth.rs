//! Admin authentication and device sessions.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::{auth, sessions};
use crate::state::AppState;

/// Mounted at `/admin`.
///
/// ```text
/// POST   /auth/login        -> login (rate limited)
/// POST   /auth/refresh      -> refresh
/// POST   /auth/logout       -> logout
/// GET    /auth/me           -> me
/// GET    /sessions          -> list_sessions
/// DELETE /sessions/{id}     -> revoke_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/sessions", get(sessions::list_sessions))
        .route("/sessions/{id}", delete(sessions::revoke_session))
}
