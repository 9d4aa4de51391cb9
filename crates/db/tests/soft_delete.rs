//! Soft-delete behaviour across content tables.
//!
//! - Soft-deleted rows stay retrievable by id with a `Deleted` state
//! - They disappear from every listing
//! - A second delete returns `false`

use assert_matches::assert_matches;
use sonaverse_db::models::image::{CreateImage, ImageListParams};
use sonaverse_db::models::product::CreateProduct;
use sonaverse_db::models::DeletionState;
use sonaverse_db::repositories::{ImageRepo, ProductRepo};

fn new_image(name: &str) -> CreateImage {
    CreateImage {
        url: format!("/uploads/general/{name}"),
        filename: name.to_string(),
        original_name: "photo.png".to_string(),
        mime_type: "image/png".to_string(),
        size_bytes: 1024,
        folder: "general".to_string(),
        uploaded_by: None,
    }
}

#[tokio::test]
async fn soft_deleted_image_is_still_found_by_id() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let image = ImageRepo::create(&pool, &new_image("a.png")).await.unwrap();
    assert_eq!(image.deletion, DeletionState::Active);

    assert!(ImageRepo::soft_delete(&pool, image.id).await.unwrap());

    let found = ImageRepo::find_by_id(&pool, image.id).await.unwrap().unwrap();
    assert_matches!(found.deletion, DeletionState::Deleted { .. });
    assert!(found.deletion.deleted_at().is_some());
}

#[tokio::test]
async fn soft_deleted_image_is_excluded_from_listing() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let kept = ImageRepo::create(&pool, &new_image("kept.png")).await.unwrap();
    let gone = ImageRepo::create(&pool, &new_image("gone.png")).await.unwrap();
    ImageRepo::soft_delete(&pool, gone.id).await.unwrap();

    let listed = ImageRepo::list(&pool, &ImageListParams::default()).await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![kept.id]);
}

#[tokio::test]
async fn second_soft_delete_returns_false() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let image = ImageRepo::create(&pool, &new_image("twice.png")).await.unwrap();

    assert!(ImageRepo::soft_delete(&pool, image.id).await.unwrap());
    assert!(!ImageRepo::soft_delete(&pool, image.id).await.unwrap());
    assert!(!ImageRepo::soft_delete(&pool, 9999).await.unwrap());
}

#[tokio::test]
async fn soft_deleted_product_leaves_public_catalogue() {
    let pool = sonaverse_db::create_memory_pool().await.unwrap();
    let product = ProductRepo::create(
        &pool,
        &CreateProduct {
            category_id: None,
            slug: None,
            name_ko: "보행기".to_string(),
            name_en: Some("Walker".to_string()),
            description_ko: None,
            description_en: None,
            sort_order: None,
            is_active: None,
        },
        "walker",
    )
    .await
    .unwrap();

    assert!(ProductRepo::find_public_by_slug(&pool, "walker").await.unwrap().is_some());
    ProductRepo::soft_delete(&pool, product.id).await.unwrap();

    assert!(ProductRepo::find_public_by_slug(&pool, "walker").await.unwrap().is_none());
    assert!(ProductRepo::list_public(&pool, None).await.unwrap().is_empty());
    let by_id = ProductRepo::find_by_id(&pool, product.id).await.unwrap().unwrap();
    assert!(by_id.deletion.is_deleted());
}
