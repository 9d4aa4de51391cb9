use axum::routing::get;
use axum::Router;

use crate::handlers::seo;
use crate::state::AppState;

/// Mounted at `/seo`.
///
/// ```text
/// GET /pages/{page}       home | products | stories | press | inquiry
/// GET /press/{slug}
/// GET /stories/{slug}
/// GET /products/{slug}
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pages/{page}", get(seo::page_seo))
        .route("/press/{slug}", get(seo::press_seo))
        .route("/stories/{slug}", get(seo::story_seo))
        .route("/products/{slug}", get(seo::product_seo))
}
