//! Product, product category and product image models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::DeletionState;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `product_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub id: DbId,
    pub slug: String,
    pub name_ko: String,
    pub name_en: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub category_id: Option<DbId>,
    pub slug: String,
    pub name_ko: String,
    pub name_en: Option<String>,
    pub description_ko: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at")]
    pub deletion: DeletionState,
}

/// A row from the `product_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: DbId,
    pub product_id: DbId,
    pub variant_key: Option<String>,
    pub image_type: String,
    pub url: String,
    pub image_id: Option<DbId>,
    pub alt_ko: Option<String>,
    pub alt_en: Option<String>,
    pub caption_ko: Option<String>,
    pub caption_en: Option<String>,
    pub order_index: i64,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Localized public views
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedCategory {
    pub id: DbId,
    pub slug: String,
    pub name: String,
}

impl ProductCategory {
    pub fn localized(&self, locale: Locale) -> LocalizedCategory {
        LocalizedCategory {
            id: self.id,
            slug: self.slug.clone(),
            name: locale::pick(locale, &self.name_ko, self.name_en.as_deref()).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedProductImage {
    pub id: DbId,
    pub variant_key: Option<String>,
    pub image_type: String,
    pub url: String,
    pub alt: Option<String>,
    pub caption: Option<String>,
    pub order: i64,
    pub is_primary: bool,
}

impl ProductImage {
    pub fn localized(&self, locale: Locale) -> LocalizedProductImage {
        LocalizedProductImage {
            id: self.id,
            variant_key: self.variant_key.clone(),
            image_type: self.image_type.clone(),
            url: self.url.clone(),
            alt: locale::pick_opt(locale, self.alt_ko.as_deref(), self.alt_en.as_deref())
                .map(str::to_string),
            caption: locale::pick_opt(locale, self.caption_ko.as_deref(), self.caption_en.as_deref())
                .map(str::to_string),
            order: self.order_index,
            is_primary: self.is_primary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedProduct {
    pub id: DbId,
    pub slug: String,
    pub category_id: Option<DbId>,
    pub name: String,
    pub description: Option<String>,
    pub images: Vec<LocalizedProductImage>,
}

impl Product {
    pub fn localized(&self, locale: Locale, images: &[ProductImage]) -> LocalizedProduct {
        LocalizedProduct {
            id: self.id,
            slug: self.slug.clone(),
            category_id: self.category_id,
            name: locale::pick(locale, &self.name_ko, self.name_en.as_deref()).to_string(),
            description: locale::pick_opt(
                locale,
                self.description_ko.as_deref(),
                self.description_en.as_deref(),
            )
            .map(str::to_string),
            images: images.iter().map(|i| i.localized(locale)).collect(),
        }
    }
}

/// Admin view of a product with every image.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithImages {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<ProductImage>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductCategory {
    pub slug: Option<String>,
    pub name_ko: String,
    pub name_en: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductCategory {
    pub slug: Option<String>,
    pub name_ko: Option<String>,
    pub name_en: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub category_id: Option<DbId>,
    pub slug: Option<String>,
    pub name_ko: String,
    pub name_en: Option<String>,
    pub description_ko: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub category_id: Option<DbId>,
    pub slug: Option<String>,
    pub name_ko: Option<String>,
    pub name_en: Option<String>,
    pub description_ko: Option<String>,
    pub description_en: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductImage {
    pub variant_key: Option<String>,
    /// Defaults to `gallery`.
    pub image_type: Option<String>,
    pub url: String,
    pub image_id: Option<DbId>,
    pub alt_ko: Option<String>,
    pub alt_en: Option<String>,
    pub caption_ko: Option<String>,
    pub caption_en: Option<String>,
    pub order_index: Option<i64>,
    #[serde(default)]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductImage {
    pub variant_key: Option<String>,
    pub alt_ko: Option<String>,
    pub alt_en: Option<String>,
    pub caption_ko: Option<String>,
    pub caption_en: Option<String>,
    pub order_index: Option<i64>,
}

/// Query parameters for `GET /api/products`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    pub locale: Option<Locale>,
    /// Category slug.
    pub category: Option<String>,
}
