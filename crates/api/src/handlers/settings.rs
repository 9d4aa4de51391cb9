//! Handlers for the site settings singleton.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_db::models::settings::UpdateSettings;
use sonaverse_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::auth::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/settings
///
/// Creates the empty settings row on first read.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::get(&state.pool).await?;
    Ok(Json(DataResponse::ok(settings)))
}

/// PUT /api/admin/settings
///
/// Admin only. Absent fields keep their current value.
pub async fn update_settings(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<impl IntoResponse> {
    let settings = SettingsRepo::update(&state.pool, &input).await?;

    tracing::info!(user_id = admin.user_id, "Site settings updated");
    Ok(Json(DataResponse::ok(settings)))
}
