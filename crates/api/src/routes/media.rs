//! Uploads and the image library.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use sonaverse_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::{images, upload};
use crate::state::AppState;

/// Headroom above the file ceiling for multipart framing and the `folder`
/// field.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// `POST /upload`, mounted at the API root.
pub fn upload_router() -> Router<AppState> {
    Router::new().route(
        "/upload",
        post(upload::upload_file).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES)),
    )
}

/// Mounted at `/admin/images`.
///
/// ```text
/// GET    /          -> list_images
/// GET    /{id}      -> get_image (deleted rows included)
/// PUT    /{id}      -> update_image
/// DELETE /{id}      -> delete_image (soft)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/", get(images::list_images)).route(
        "/{id}",
        get(images::get_image)
            .put(images::update_image)
            .delete(images::delete_image),
    )
}
