//! Handlers for press releases.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::error::CoreError;
use sonaverse_core::slug::resolve_slug;
use sonaverse_core::types::DbId;
use sonaverse_db::models::press::{CreatePress, PublicListParams, UpdatePress};
use sonaverse_db::repositories::{page_window, PressRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags::explicit_slug;
use crate::middleware::auth::RequireAuth;
use crate::query::{LocaleParams, PageParams};
use crate::response::{DataResponse, MessageResponse, Pagination};
use crate::state::AppState;

fn press_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PressRelease",
        id,
    })
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/press?locale=&page=&limit=&tag=
///
/// Published releases, newest first. Bodies are omitted from the list.
pub async fn list_press(
    State(state): State<AppState>,
    Query(params): Query<PublicListParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale.unwrap_or_default();
    let (page, limit, offset) = page_window(params.page, params.limit);

    let (rows, total) = PressRepo::list_public(&state.pool, params.tag.as_deref(), limit, offset).await?;
    let items = rows.iter().map(|p| p.localized(locale, false)).collect::<Vec<_>>();

    Ok(Json(DataResponse::paginated(items, Pagination { page, limit, total })))
}

/// GET /api/press/{slug}?locale=
pub async fn get_press(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let press = PressRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFoundBySlug {
            entity: "PressRelease",
            slug: slug.clone(),
        }))?;
    Ok(Json(DataResponse::ok(press.localized(params.locale(), true))))
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

/// GET /api/admin/press?page=&limit=
///
/// Drafts and inactive releases included.
pub async fn list_press_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let (page, limit, offset) = page_window(params.page, params.limit);
    let (rows, total) = PressRepo::list_admin(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse::paginated(rows, Pagination { page, limit, total })))
}

/// GET /api/admin/press/{id}
pub async fn get_press_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(press_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let press = PressRepo::find_by_id(&state.pool, press_id)
        .await?
        .ok_or_else(|| press_not_found(press_id))?;
    Ok(Json(DataResponse::ok(press)))
}

/// POST /api/admin/press
pub async fn create_press(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreatePress>,
) -> AppResult<impl IntoResponse> {
    if input.title_ko.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "제목(한국어)은 필수입니다.".into(),
        )));
    }
    let slug = resolve_slug(
        input.slug.as_deref(),
        &[input.title_en.as_deref(), Some(&input.title_ko)],
    )?;

    let press = PressRepo::create(&state.pool, &input, &slug, Some(user.user_id)).await?;

    tracing::info!(
        press_id = press.press.id,
        user_id = user.user_id,
        tags = press.tags.len(),
        "Press release created"
    );
    Ok(Json(DataResponse::ok(press)))
}

/// PUT /api/admin/press/{id}
///
/// `tagIds`, when present, replaces the tag set and adjusts usage counts.
pub async fn update_press(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(press_id): Path<DbId>,
    Json(input): Json<UpdatePress>,
) -> AppResult<impl IntoResponse> {
    let slug = explicit_slug(input.slug.as_deref())?;
    let press = PressRepo::update(&state.pool, press_id, &input, slug)
        .await?
        .ok_or_else(|| press_not_found(press_id))?;

    tracing::info!(press_id, user_id = user.user_id, "Press release updated");
    Ok(Json(DataResponse::ok(press)))
}

/// DELETE /api/admin/press/{id}
///
/// Soft delete. Detaches every tag so usage counts drop.
pub async fn delete_press(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(press_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !PressRepo::soft_delete(&state.pool, press_id).await? {
        return Err(press_not_found(press_id));
    }

    tracing::info!(press_id, user_id = user.user_id, "Press release deleted");
    Ok(Json(MessageResponse::ok("보도자료가 삭제되었습니다.")))
}
