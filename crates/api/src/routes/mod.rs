pub mod auth;
pub mod content;
pub mod health;
pub mod inquiries;
pub mod media;
pub mod products;
pub mod seo;
pub mod tags;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /upload                                   multipart upload (auth)
/// /tags, /products, /product-categories     public catalogue
/// /settings, /history, /press, /stories     public content
/// /inquiries                                public submission (rate limited)
/// /seo/...                                  page metadata
///
/// /admin/auth/{login,refresh,logout,me}     session lifecycle
/// /admin/sessions                           signed-in devices
/// /admin/images                             image library
/// /admin/tags                               tag CRUD
/// /admin/products, /admin/product-categories
/// /admin/settings, /admin/history, /admin/press, /admin/stories
/// /admin/inquiries                          inquiry triage (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    let admin = Router::new()
        .merge(auth::router())
        .merge(products::admin_router())
        .merge(content::admin_router())
        .nest("/images", media::admin_router())
        .nest("/tags", tags::admin_router())
        .nest("/inquiries", inquiries::admin_router());

    Router::new()
        .merge(media::upload_router())
        .merge(tags::public_router())
        .merge(products::public_router())
        .merge(content::public_router())
        .merge(inquiries::public_router())
        .nest("/seo", seo::router())
        .nest("/admin", admin)
}
