use axum::routing::get;
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// `GET /tags?type=&locale=`, public.
pub fn public_router() -> Router<AppState> {
    Router::new().route("/tags", get(tags::list_tags))
}

/// Mounted at `/admin/tags`.
///
/// ```text
/// GET    /          -> list_tags_admin
/// POST   /          -> create_tag
/// GET    /{id}      -> get_tag
/// PUT    /{id}      -> update_tag
/// DELETE /{id}      -> delete_tag (admin only)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags_admin).post(tags::create_tag))
        .route(
            "/{id}",
            get(tags::get_tag).put(tags::update_tag).delete(tags::delete_tag),
        )
}
