//! Editorial content: settings, history, press releases and stories.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{history, press, settings, stories};
use crate::state::AppState;

/// Public reads, mounted at the API root.
///
/// ```text
/// GET /settings
/// GET /history?locale=
/// GET /press?locale=&page=&limit=&tag=
/// GET /press/{slug}
/// GET /stories?locale=&page=&limit=&tag=&main=
/// GET /stories/{slug}
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/settings", get(settings::get_settings))
        .route("/history", get(history::list_history))
        .route("/press", get(press::list_press))
        .route("/press/{slug}", get(press::get_press))
        .route("/stories", get(stories::list_stories))
        .route("/stories/{slug}", get(stories::get_story))
}

/// Admin CRUD, mounted at `/admin`.
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/settings", put(settings::update_settings))
        .route(
            "/history",
            get(history::list_history_admin).post(history::create_history),
        )
        .route(
            "/history/{id}",
            get(history::get_history)
                .put(history::update_history)
                .delete(history::delete_history),
        )
        .route("/press", get(press::list_press_admin).post(press::create_press))
        .route(
            "/press/{id}",
            get(press::get_press_admin)
                .put(press::update_press)
                .delete(press::delete_press),
        )
        .route(
            "/stories",
            get(stories::list_stories_admin).post(stories::create_story),
        )
        .route(
            "/stories/{id}",
            get(stories::get_story_admin)
                .put(stories::update_story)
                .delete(stories::delete_story),
        )
}
