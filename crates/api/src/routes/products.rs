//! Product catalogue routes.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Public catalogue, mounted at the API root.
///
/// ```text
/// GET /products                 -> list_products
/// GET /products/{slug}          -> get_product
/// GET /product-categories       -> list_categories
/// ```
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/products/{slug}", get(products::get_product))
        .route("/product-categories", get(products::list_categories))
}

/// Mounted at `/admin`.
///
/// ```text
/// GET, POST          /products
/// GET, PUT, DELETE   /products/{id}
/// POST               /products/{id}/images
/// PUT, DELETE        /products/{id}/images/{image_id}
/// POST               /products/{id}/images/{image_id}/primary
/// GET, POST          /product-categories
/// PUT, DELETE        /product-categories/{id}
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products_admin).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product_admin)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/products/{id}/images", post(products::add_product_image))
        .route(
            "/products/{id}/images/{image_id}",
            put(products::update_product_image).delete(products::delete_product_image),
        )
        .route(
            "/products/{id}/images/{image_id}/primary",
            post(products::set_primary_image),
        )
        .route(
            "/product-categories",
            get(products::list_categories_admin).post(products::create_category),
        )
        .route(
            "/product-categories/{id}",
            put(products::update_category).delete(products::delete_category),
        )
}
