//! Handlers serving page metadata for the site's `<head>`.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::error::CoreError;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::seo::{
    page_metadata, press_metadata, product_metadata, story_metadata, ContentSeo, StaticPage,
};
use sonaverse_db::repositories::{PressRepo, ProductImageRepo, ProductRepo, StoryRepo};

use crate::error::{AppError, AppResult};
use crate::query::LocaleParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(entity: &'static str, slug: &str) -> AppError {
    AppError::Core(CoreError::NotFoundBySlug {
        entity,
        slug: slug.to_string(),
    })
}

/// GET /api/seo/pages/{page}?locale=
pub async fn page_seo(
    State(state): State<AppState>,
    Path(page): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let page: StaticPage = page.parse()?;
    let meta = page_metadata(page, params.locale(), &state.config.site_url);
    Ok(Json(DataResponse::ok(meta)))
}

/// GET /api/seo/press/{slug}?locale=
pub async fn press_seo(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale();
    let found = PressRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("PressRelease", &slug))?;
    let press = found.localized(locale, true);

    let content = ContentSeo {
        title: &press.title,
        description: description_source(press.summary.as_deref(), press.body.as_deref()),
        path: format!("press/{}", press.slug),
        image: press.thumbnail_url.as_deref(),
        published_at: Some(press.published_at),
    };
    Ok(Json(DataResponse::ok(press_metadata(&content, locale, &state.config.site_url))))
}

/// GET /api/seo/stories/{slug}?locale=
pub async fn story_seo(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale();
    let found = StoryRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("Story", &slug))?;
    let story = found.localized(locale, true);

    let content = ContentSeo {
        title: &story.title,
        description: description_source(story.summary.as_deref(), story.body.as_deref()),
        path: format!("sonaverse-story/{}", story.slug),
        image: story.thumbnail_url.as_deref(),
        published_at: Some(story.published_at),
    };
    Ok(Json(DataResponse::ok(story_metadata(&content, locale, &state.config.site_url))))
}

/// GET /api/seo/products/{slug}?locale=
///
/// The share image is the primary `main` image, falling back to the first
/// image of any type.
pub async fn product_seo(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale: Locale = params.locale();
    let product = ProductRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| not_found("Product", &slug))?;
    let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;

    let image = images
        .iter()
        .find(|i| i.is_primary && i.image_type == "main")
        .or_else(|| images.first())
        .map(|i| i.url.as_str());
    let name = locale::pick(locale, &product.name_ko, product.name_en.as_deref());
    let description = locale::pick_opt(
        locale,
        product.description_ko.as_deref(),
        product.description_en.as_deref(),
    )
    .unwrap_or(name);

    let content = ContentSeo {
        title: name,
        description,
        path: format!("products/{}", product.slug),
        image,
        published_at: None,
    };
    Ok(Json(DataResponse::ok(product_metadata(&content, locale, &state.config.site_url))))
}

/// Summary when present, otherwise the body.
fn description_source<'a>(summary: Option<&'a str>, body: Option<&'a str>) -> &'a str {
    summary
        .filter(|s| !s.trim().is_empty())
        .or(body)
        .unwrap_or_default()
}
