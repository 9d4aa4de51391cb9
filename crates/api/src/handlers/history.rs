//! Handlers for company history entries.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::error::CoreError;
use sonaverse_core::history::{validate_color, validate_year, HistoryPosition};
use sonaverse_core::types::DbId;
use sonaverse_db::models::history::{CreateHistory, UpdateHistory};
use sonaverse_db::repositories::HistoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAuth;
use crate::query::LocaleParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn history_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "History", id })
}

/// Shared checks for the optional styling fields of create and update.
fn validate_style(
    badge_color: Option<&str>,
    text_color: Option<&str>,
    position: Option<&str>,
) -> AppResult<()> {
    if let Some(color) = badge_color {
        validate_color("badgeColor", color)?;
    }
    if let Some(color) = text_color {
        validate_color("textColor", color)?;
    }
    if let Some(position) = position {
        HistoryPosition::parse(position)?;
    }
    Ok(())
}

/// GET /api/history?locale=ko|en
///
/// Active entries by year, then order. Items keep their own order.
pub async fn list_history(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale();
    let entries = HistoryRepo::list_public(&state.pool)
        .await?
        .iter()
        .map(|h| h.localized(locale))
        .collect::<Vec<_>>();
    Ok(Json(DataResponse::ok(entries)))
}

/// GET /api/admin/history
///
/// Inactive entries included.
pub async fn list_history_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let entries = HistoryRepo::list_admin(&state.pool).await?;
    Ok(Json(DataResponse::ok(entries)))
}

/// GET /api/admin/history/{id}
pub async fn get_history(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(history_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = HistoryRepo::find_by_id(&state.pool, history_id)
        .await?
        .ok_or_else(|| history_not_found(history_id))?;
    Ok(Json(DataResponse::ok(entry)))
}

/// POST /api/admin/history
pub async fn create_history(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateHistory>,
) -> AppResult<impl IntoResponse> {
    validate_year(input.year)?;
    if input.title_ko.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "제목(한국어)은 필수입니다.".into(),
        )));
    }
    validate_style(
        input.badge_color.as_deref(),
        input.text_color.as_deref(),
        input.position.as_deref(),
    )?;

    let entry = HistoryRepo::create(&state.pool, &input).await?;

    tracing::info!(history_id = entry.history.id, year = entry.history.year, user_id = user.user_id, "History entry created");
    Ok(Json(DataResponse::ok(entry)))
}

/// PUT /api/admin/history/{id}
///
/// `items`, when present, replaces every item of the entry.
pub async fn update_history(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(history_id): Path<DbId>,
    Json(input): Json<UpdateHistory>,
) -> AppResult<impl IntoResponse> {
    if let Some(year) = input.year {
        validate_year(year)?;
    }
    validate_style(
        input.badge_color.as_deref(),
        input.text_color.as_deref(),
        input.position.as_deref(),
    )?;

    let entry = HistoryRepo::update(&state.pool, history_id, &input)
        .await?
        .ok_or_else(|| history_not_found(history_id))?;

    tracing::info!(history_id, user_id = user.user_id, "History entry updated");
    Ok(Json(DataResponse::ok(entry)))
}

/// DELETE /api/admin/history/{id}
pub async fn delete_history(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(history_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !HistoryRepo::soft_delete(&state.pool, history_id).await? {
        return Err(history_not_found(history_id));
    }

    tracing::info!(history_id, user_id = user.user_id, "History entry deleted");
    Ok(Json(MessageResponse::ok("연혁이 삭제되었습니다.")))
}
