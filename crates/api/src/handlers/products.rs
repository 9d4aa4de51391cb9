//! Handlers for products, product categories and product images.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use sonaverse_core::content::{parse_optional, ProductImageType};
use sonaverse_core::error::CoreError;
use sonaverse_core::slug::resolve_slug;
use sonaverse_core::types::DbId;
use sonaverse_db::models::product::{
    CreateProduct, CreateProductCategory, CreateProductImage, Product, ProductListParams,
    ProductWithImages, UpdateProduct, UpdateProductCategory, UpdateProductImage,
};
use sonaverse_db::repositories::{ProductCategoryRepo, ProductImageRepo, ProductRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::tags::explicit_slug;
use crate::middleware::auth::RequireAuth;
use crate::query::LocaleParams;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

fn product_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Product", id })
}

fn category_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductCategory",
        id,
    })
}

fn product_image_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ProductImage",
        id,
    })
}

fn require_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "이름(한국어)은 필수입니다.".into(),
        )));
    }
    Ok(())
}

/// Non-deleted product, for admin edits.
async fn live_product(state: &AppState, product_id: DbId) -> AppResult<Product> {
    ProductRepo::find_by_id(&state.pool, product_id)
        .await?
        .filter(|p| !p.deletion.is_deleted())
        .ok_or_else(|| product_not_found(product_id))
}

// ---------------------------------------------------------------------------
// Public
// ---------------------------------------------------------------------------

/// GET /api/products?locale=&category=
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale.unwrap_or_default();
    let products = ProductRepo::list_public(&state.pool, params.category.as_deref()).await?;

    let mut localized = Vec::with_capacity(products.len());
    for product in &products {
        let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;
        localized.push(product.localized(locale, &images));
    }

    Ok(Json(DataResponse::ok(localized)))
}

/// GET /api/products/{slug}?locale=
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_public_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFoundBySlug {
            entity: "Product",
            slug: slug.clone(),
        }))?;
    let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;

    Ok(Json(DataResponse::ok(product.localized(params.locale(), &images))))
}

/// GET /api/product-categories?locale=
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<LocaleParams>,
) -> AppResult<impl IntoResponse> {
    let locale = params.locale();
    let categories = ProductCategoryRepo::list(&state.pool, true)
        .await?
        .iter()
        .map(|c| c.localized(locale))
        .collect::<Vec<_>>();
    Ok(Json(DataResponse::ok(categories)))
}

// ---------------------------------------------------------------------------
// Admin: categories
// ---------------------------------------------------------------------------

/// GET /api/admin/product-categories
pub async fn list_categories_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = ProductCategoryRepo::list(&state.pool, false).await?;
    Ok(Json(DataResponse::ok(categories)))
}

/// POST /api/admin/product-categories
pub async fn create_category(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateProductCategory>,
) -> AppResult<impl IntoResponse> {
    require_name(&input.name_ko)?;
    let slug = resolve_slug(
        input.slug.as_deref(),
        &[input.name_en.as_deref(), Some(&input.name_ko)],
    )?;

    let category = ProductCategoryRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(category_id = category.id, user_id = user.user_id, "Product category created");
    Ok(Json(DataResponse::ok(category)))
}

/// PUT /api/admin/product-categories/{id}
pub async fn update_category(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
    Json(input): Json<UpdateProductCategory>,
) -> AppResult<impl IntoResponse> {
    let slug = explicit_slug(input.slug.as_deref())?;
    let category = ProductCategoryRepo::update(&state.pool, category_id, &input, slug)
        .await?
        .ok_or_else(|| category_not_found(category_id))?;

    tracing::info!(category_id, user_id = user.user_id, "Product category updated");
    Ok(Json(DataResponse::ok(category)))
}

/// DELETE /api/admin/product-categories/{id}
///
/// Products in the category are kept and become uncategorized.
pub async fn delete_category(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductCategoryRepo::delete(&state.pool, category_id).await? {
        return Err(category_not_found(category_id));
    }

    tracing::info!(category_id, user_id = user.user_id, "Product category deleted");
    Ok(Json(MessageResponse::ok("카테고리가 삭제되었습니다.")))
}

// ---------------------------------------------------------------------------
// Admin: products
// ---------------------------------------------------------------------------

/// GET /api/admin/products
///
/// Active and inactive products with every image, in both languages.
pub async fn list_products_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list_admin(&state.pool).await?;

    let mut result = Vec::with_capacity(products.len());
    for product in products {
        let images = ProductImageRepo::list_for_product(&state.pool, product.id).await?;
        result.push(ProductWithImages { product, images });
    }

    Ok(Json(DataResponse::ok(result)))
}

/// GET /api/admin/products/{id}
pub async fn get_product_admin(
    _auth: RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = live_product(&state, product_id).await?;
    let images = ProductImageRepo::list_for_product(&state.pool, product_id).await?;
    Ok(Json(DataResponse::ok(ProductWithImages { product, images })))
}

/// POST /api/admin/products
pub async fn create_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    require_name(&input.name_ko)?;
    let slug = resolve_slug(
        input.slug.as_deref(),
        &[input.name_en.as_deref(), Some(&input.name_ko)],
    )?;

    let product = ProductRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(product_id = product.id, user_id = user.user_id, slug = %product.slug, "Product created");
    Ok(Json(DataResponse::ok(ProductWithImages {
        product,
        images: Vec::new(),
    })))
}

/// PUT /api/admin/products/{id}
pub async fn update_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    let slug = explicit_slug(input.slug.as_deref())?;
    let product = ProductRepo::update(&state.pool, product_id, &input, slug)
        .await?
        .ok_or_else(|| product_not_found(product_id))?;
    let images = ProductImageRepo::list_for_product(&state.pool, product_id).await?;

    tracing::info!(product_id, user_id = user.user_id, "Product updated");
    Ok(Json(DataResponse::ok(ProductWithImages { product, images })))
}

/// DELETE /api/admin/products/{id}
pub async fn delete_product(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::soft_delete(&state.pool, product_id).await? {
        return Err(product_not_found(product_id));
    }

    tracing::info!(product_id, user_id = user.user_id, "Product deleted");
    Ok(Json(MessageResponse::ok("제품이 삭제되었습니다.")))
}

// ---------------------------------------------------------------------------
// Admin: product images
// ---------------------------------------------------------------------------

/// POST /api/admin/products/{id}/images
///
/// `imageType` defaults to `gallery`.
pub async fn add_product_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(product_id): Path<DbId>,
    Json(input): Json<CreateProductImage>,
) -> AppResult<impl IntoResponse> {
    live_product(&state, product_id).await?;

    if input.url.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "이미지 URL은 필수입니다.".into(),
        )));
    }
    let image_type = parse_optional::<ProductImageType>(input.image_type.as_deref())?
        .unwrap_or(ProductImageType::Gallery);

    let image = ProductImageRepo::create(&state.pool, product_id, &input, image_type).await?;

    tracing::info!(
        product_id,
        product_image_id = image.id,
        is_primary = image.is_primary,
        user_id = user.user_id,
        "Product image added"
    );
    Ok(Json(DataResponse::ok(image)))
}

/// PUT /api/admin/products/{id}/images/{image_id}
pub async fn update_product_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProductImage>,
) -> AppResult<impl IntoResponse> {
    let image = ProductImageRepo::update(&state.pool, product_id, image_id, &input)
        .await?
        .ok_or_else(|| product_image_not_found(image_id))?;

    tracing::info!(product_id, product_image_id = image_id, user_id = user.user_id, "Product image updated");
    Ok(Json(DataResponse::ok(image)))
}

/// DELETE /api/admin/products/{id}/images/{image_id}
pub async fn delete_product_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    if !ProductImageRepo::delete(&state.pool, product_id, image_id).await? {
        return Err(product_image_not_found(image_id));
    }

    tracing::info!(product_id, product_image_id = image_id, user_id = user.user_id, "Product image removed");
    Ok(Json(MessageResponse::ok("이미지가 삭제되었습니다.")))
}

/// POST /api/admin/products/{id}/images/{image_id}/primary
///
/// Demotes any other primary image of the same product and type.
pub async fn set_primary_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path((product_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    let image = ProductImageRepo::set_primary(&state.pool, product_id, image_id)
        .await?
        .ok_or_else(|| product_image_not_found(image_id))?;

    tracing::info!(product_id, product_image_id = image_id, user_id = user.user_id, "Primary product image set");
    Ok(Json(DataResponse::ok(image)))
}
