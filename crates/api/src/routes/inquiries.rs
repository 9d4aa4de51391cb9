use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// `POST /inquiries`, public and rate limited.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/inquiries", post(inquiries::submit_inquiry))
}

/// Mounted at `/admin/inquiries`, admin only.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::list_inquiries))
        .route("/{id}/status", put(inquiries::update_inquiry_status))
}
