//! Handlers for brand stories.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::error::CoreError;
use sonaverse_core::slug::resolve_slug;
use sonaverse_core::types::DbId;
use sonaverse_db::models::press::PublicListParams;
use sonaverse_db::models::story::{CreateStory, UpdateStory};
use sonaverse_db::repositories::{page_window, StoryRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags::explicit_slug;
use crate::middleware::auth::RequireAuth;
use crate::query::{LocaleParams, PageParams};
use crate::response::{DataResponse, MessageResponse, Pagination};
use crate::state::AppState;

fn story_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Story", id })
}

/// GET /api/stories?locale=&page=&limit=&tag=&main=true
pub async fn list_stories(
    State(state): State<AppState>,
    Query(params): Query<PublicListParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale.unwrap_or_default();
    let (page, limit, offset) = page_window(params.page, params.limit);

    let (rows, total) = StoryRepo::list_public(
        &state.pool,
        params.tag.as_deref(),
        params.main.unwrap_or(false),
        limit,
        offset,
    )
    .await?;
    let items = rows.iter().map(|s| s.localized(locale, false)).collect::<Vec<_>>();

    Ok(Json(DataResponse::paginated(items, Pagination { page, limit, total })))
}

/// GET /api/stories/{slug}?locale=
pub async fn get_story(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFoundBySlug {
            entity: "Story",
            slug: slug.clone(),
        }))?;
    Ok(Json(DataResponse::ok(story.localized(params.locale(), true))))
}

/// GET /api/admin/stories?page=&limit=
pub async fn list_stories_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let (page, limit, offset) = page_window(params.page, params.limit);
    let (rows, total) = StoryRepo::list_admin(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse::paginated(rows, Pagination { page, limit, total })))
}

/// GET /api/admin/stories/{id}
pub async fn get_story_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let story = StoryRepo::find_by_id(&state.pool, story_id)
        .await?
        .ok_or_else(|| story_not_found(story_id))?;
    Ok(Json(DataResponse::ok(story)))
}

/// POST /api/admin/stories
pub async fn create_story(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateStory>,
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

    let story = StoryRepo::create(&state.pool, &input, &slug, Some(user.user_id)).await?;

    tracing::info!(story_id = story.story.id, user_id = user.user_id, "Story created");
    Ok(Json(DataResponse::ok(story)))
}

/// PUT /api/admin/stories/{id}
pub async fn update_story(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
    Json(input): Json<UpdateStory>,
) -> AppResult<impl IntoResponse> {
    let slug = explicit_slug(input.slug.as_deref())?;
    let story = StoryRepo::update(&state.pool, story_id, &input, slug)
        .await?
        .ok_or_else(|| story_not_found(story_id))?;

    tracing::info!(story_id, user_id = user.user_id, "Story updated");
    Ok(Json(DataResponse::ok(story)))
}

/// DELETE /api/admin/stories/{id}
pub async fn delete_story(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(story_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !StoryRepo::soft_delete(&state.pool, story_id).await? {
        return Err(story_not_found(story_id));
    }

    tracing::info!(story_id, user_id = user.user_id, "Story deleted");
    Ok(Json(MessageResponse::ok("스토리가 삭제되었습니다.")))
}
