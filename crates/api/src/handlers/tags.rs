//! Handlers for tags: public listing plus admin CRUD.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::content::{parse_optional, TagType};
use sonaverse_core::error::CoreError;
use sonaverse_core::slug::{resolve_slug, validate_slug};
use sonaverse_core::types::DbId;
use sonaverse_db::models::tag::{CreateTag, TagListParams, UpdateTag};
use sonaverse_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{RequireAdmin, RequireAuth};
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn tag_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Tag", id })
}

/// GET /api/tags?type=&locale=
///
/// Public, localized, most used first.
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<impl IntoResponse> {
    let tag_type = parse_optional::<TagType>(params.tag_type.as_deref())?;
    let locale = params.locale.unwrap_or_default();

    let tags = TagRepo::list(&state.pool, tag_type)
        .await?
        .iter()
        .map(|t| t.localized(locale))
        .collect::<Vec<_>>();

    Ok(Json(DataResponse::ok(tags)))
}

/// GET /api/admin/tags
///
/// Both languages, with usage counts.
pub async fn list_tags_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<TagListParams>,
) -> AppResult<impl IntoResponse> {
    let tag_type = parse_optional::<TagType>(params.tag_type.as_deref())?;
    let tags = TagRepo::list(&state.pool, tag_type).await?;
    Ok(Json(DataResponse::ok(tags)))
}

/// GET /api/admin/tags/{id}
pub async fn get_tag(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tag = TagRepo::find_detail(&state.pool, tag_id)
        .await?
        .ok_or_else(|| tag_not_found(tag_id))?;
    Ok(Json(DataResponse::ok(tag)))
}

/// POST /api/admin/tags
///
/// The slug defaults to one derived from the English, then Korean, name.
pub async fn create_tag(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<impl IntoResponse> {
    if input.name_ko.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "태그 이름(한국어)은 필수입니다.".into(),
        )));
    }
    let slug = resolve_slug(
        input.slug.as_deref(),
        &[input.name_en.as_deref(), Some(&input.name_ko)],
    )?;
    let tag_type = parse_optional::<TagType>(input.tag_type.as_deref())?.unwrap_or(TagType::General);

    let tag = TagRepo::create(&state.pool, &input, &slug, tag_type).await?;

    tracing::info!(tag_id = tag.tag.id, user_id = user.user_id, slug = %tag.tag.slug, "Tag created");
    Ok(Json(DataResponse::ok(tag)))
}

/// PUT /api/admin/tags/{id}
pub async fn update_tag(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
    Json(input): Json<UpdateTag>,
) -> AppResult<impl IntoResponse> {
    let slug = explicit_slug(input.slug.as_deref())?;
    let tag_type = parse_optional::<TagType>(input.tag_type.as_deref())?;

    let tag = TagRepo::update(&state.pool, tag_id, &input, slug, tag_type)
        .await?
        .ok_or_else(|| tag_not_found(tag_id))?;

    tracing::info!(tag_id, user_id = user.user_id, "Tag updated");
    Ok(Json(DataResponse::ok(tag)))
}

/// DELETE /api/admin/tags/{id}
///
/// Hard delete, admin only. Attachments to content are removed with it.
pub async fn delete_tag(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !TagRepo::delete(&state.pool, tag_id).await? {
        return Err(tag_not_found(tag_id));
    }

    tracing::info!(tag_id, user_id = admin.user_id, "Tag deleted");
    Ok(Json(MessageResponse::ok("태그가 삭제되었습니다.")))
}

/// A caller-supplied slug on update: trimmed, validated, `None` when blank.
pub(crate) fn explicit_slug(slug: Option<&str>) -> AppResult<Option<&str>> {
    match slug.map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => {
            validate_slug(slug)?;
            Ok(Some(slug))
        }
        None => Ok(None),
    }
}
