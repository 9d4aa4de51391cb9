//! Repositories for `product_categories`, `products` and `product_images`.

use chrono::Utc;
use sonaverse_core::content::ProductImageType;
use sonaverse_core::types::{DbId, Timestamp};
use sqlx::SqliteConnection;

use crate::models::product::{
    CreateProduct, CreateProductCategory, CreateProductImage, Product, ProductCategory,
    ProductImage, UpdateProduct, UpdateProductCategory, UpdateProductImage,
};
use crate::DbPool;

const CATEGORY_COLUMNS: &str = "id, slug, name_ko, name_en, sort_order, is_active, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "\
    id, category_id, slug, name_ko, name_en, description_ko, description_en, \
    sort_order, is_active, created_at, updated_at, deleted_at";

const IMAGE_COLUMNS: &str = "\
    id, product_id, variant_key, image_type, url, image_id, alt_ko, alt_en, \
    caption_ko, caption_en, order_index, is_primary, created_at, updated_at";

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub struct ProductCategoryRepo;

impl ProductCategoryRepo {
    pub async fn create(
        pool: &DbPool,
        input: &CreateProductCategory,
        slug: &str,
    ) -> Result<ProductCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_categories (slug, name_ko, name_en, sort_order, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6) \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ProductCategory>(&query)
            .bind(slug)
            .bind(&input.name_ko)
            .bind(&input.name_en)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_active.unwrap_or(true))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<ProductCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM product_categories WHERE id = ?1");
        sqlx::query_as::<_, ProductCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Categories by sort order; `active_only` hides inactive ones.
    pub async fn list(pool: &DbPool, active_only: bool) -> Result<Vec<ProductCategory>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM product_categories \
             WHERE (?1 = 0 OR is_active = 1) \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, ProductCategory>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProductCategory,
        slug: Option<&str>,
    ) -> Result<Option<ProductCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE product_categories SET \
                slug = COALESCE(?2, slug), \
                name_ko = COALESCE(?3, name_ko), \
                name_en = COALESCE(?4, name_en), \
                sort_order = COALESCE(?5, sort_order), \
                is_active = COALESCE(?6, is_active), \
                updated_at = ?7 \
             WHERE id = ?1 \
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, ProductCategory>(&query)
            .bind(id)
            .bind(slug)
            .bind(&input.name_ko)
            .bind(&input.name_en)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    /// Hard delete. Products in the category become uncategorized.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_categories WHERE id = ?1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

pub struct ProductRepo;

impl ProductRepo {
    pub async fn create(pool: &DbPool, input: &CreateProduct, slug: &str) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products (category_id, slug, name_ko, name_en, description_ko, description_en, \
                                   sort_order, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.category_id)
            .bind(slug)
            .bind(&input.name_ko)
            .bind(&input.name_en)
            .bind(&input.description_ko)
            .bind(&input.description_en)
            .bind(input.sort_order.unwrap_or(0))
            .bind(input.is_active.unwrap_or(true))
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Find by id, soft-deleted rows included.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active, non-deleted product by slug.
    pub async fn find_public_by_slug(pool: &DbPool, slug: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE slug = ?1 AND is_active = 1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Public catalogue, optionally restricted to one active category slug.
    pub async fn list_public(pool: &DbPool, category_slug: Option<&str>) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM products p \
             LEFT JOIN product_categories c ON c.id = p.category_id \
             WHERE p.is_active = 1 AND p.deleted_at IS NULL \
               AND (?1 IS NULL OR (c.slug = ?1 AND c.is_active = 1)) \
             ORDER BY p.sort_order ASC, p.id ASC",
            PRODUCT_COLUMNS
                .split(", ")
                .map(|c| format!("p.{}", c.trim()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(category_slug)
            .fetch_all(pool)
            .await
    }

    /// Admin listing: every non-deleted product, active or not.
    pub async fn list_admin(pool: &DbPool) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE deleted_at IS NULL \
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateProduct,
        slug: Option<&str>,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                category_id = COALESCE(?2, category_id), \
                slug = COALESCE(?3, slug), \
                name_ko = COALESCE(?4, name_ko), \
                name_en = COALESCE(?5, name_en), \
                description_ko = COALESCE(?6, description_ko), \
                description_en = COALESCE(?7, description_en), \
                sort_order = COALESCE(?8, sort_order), \
                is_active = COALESCE(?9, is_active), \
                updated_at = ?10 \
             WHERE id = ?1 AND deleted_at IS NULL \
             RETURNING {PRODUCT_COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(slug)
            .bind(&input.name_ko)
            .bind(&input.name_en)
            .bind(&input.description_ko)
            .bind(&input.description_en)
            .bind(input.sort_order)
            .bind(input.is_active)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    pub async fn soft_delete(pool: &DbPool, id: DbId) -> Result<bool, sqlx::Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE products SET deleted_at = ?2, updated_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Product images
// ---------------------------------------------------------------------------

pub struct ProductImageRepo;

impl ProductImageRepo {
    /// Insert an image. When `is_primary` is set the previous primary of the
    /// same product and type is demoted in the same transaction.
    pub async fn create(
        pool: &DbPool,
        product_id: DbId,
        input: &CreateProductImage,
        image_type: ProductImageType,
    ) -> Result<ProductImage, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        if input.is_primary {
            Self::demote_primaries(&mut *tx, product_id, image_type.as_str(), now).await?;
        }

        let query = format!(
            "INSERT INTO product_images (product_id, variant_key, image_type, url, image_id, \
                                         alt_ko, alt_en, caption_ko, caption_en, order_index, \
                                         is_primary, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12) \
             RETURNING {IMAGE_COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(&input.variant_key)
            .bind(image_type.as_str())
            .bind(&input.url)
            .bind(input.image_id)
            .bind(&input.alt_ko)
            .bind(&input.alt_en)
            .bind(&input.caption_ko)
            .bind(&input.caption_en)
            .bind(input.order_index.unwrap_or(0))
            .bind(input.is_primary)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(image)
    }

    /// Images of a product ordered by type, then `order_index`.
    pub async fn list_for_product(pool: &DbPool, product_id: DbId) -> Result<Vec<ProductImage>, sqlx::Error> {
        let query = format!(
            "SELECT {IMAGE_COLUMNS} FROM product_images WHERE product_id = ?1 \
             ORDER BY image_type ASC, order_index ASC, id ASC"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &DbPool,
        product_id: DbId,
        image_id: DbId,
        input: &UpdateProductImage,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let query = format!(
            "UPDATE product_images SET \
                variant_key = COALESCE(?3, variant_key), \
                alt_ko = COALESCE(?4, alt_ko), \
                alt_en = COALESCE(?5, alt_en), \
                caption_ko = COALESCE(?6, caption_ko), \
                caption_en = COALESCE(?7, caption_en), \
                order_index = COALESCE(?8, order_index), \
                updated_at = ?9 \
             WHERE id = ?2 AND product_id = ?1 \
             RETURNING {IMAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ProductImage>(&query)
            .bind(product_id)
            .bind(image_id)
            .bind(&input.variant_key)
            .bind(&input.alt_ko)
            .bind(&input.alt_en)
            .bind(&input.caption_ko)
            .bind(&input.caption_en)
            .bind(input.order_index)
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &DbPool, product_id: DbId, image_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_images WHERE id = ?2 AND product_id = ?1")
            .bind(product_id)
            .bind(image_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Make `image_id` the only primary image of its product and type.
    ///
    /// Returns `None` when the image does not belong to `product_id`.
    pub async fn set_primary(
        pool: &DbPool,
        product_id: DbId,
        image_id: DbId,
    ) -> Result<Option<ProductImage>, sqlx::Error> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;

        let image_type: Option<String> = sqlx::query_scalar(
            "SELECT image_type FROM product_images WHERE id = ?2 AND product_id = ?1",
        )
        .bind(product_id)
        .bind(image_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(image_type) = image_type else {
            return Ok(None);
        };

        Self::demote_primaries(&mut *tx, product_id, &image_type, now).await?;

        let query = format!(
            "UPDATE product_images SET is_primary = 1, updated_at = ?2 WHERE id = ?1 \
             RETURNING {IMAGE_COLUMNS}"
        );
        let image = sqlx::query_as::<_, ProductImage>(&query)
            .bind(image_id)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(image))
    }

    async fn demote_primaries(
        conn: &mut SqliteConnection,
        product_id: DbId,
        image_type: &str,
        now: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE product_images SET is_primary = 0, updated_at = ?3 \
             WHERE product_id = ?1 AND image_type = ?2 AND is_primary = 1",
        )
        .bind(product_id)
        .bind(image_type)
        .bind(now)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}
