//! Tag models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: DbId,
    pub name_ko: String,
    pub name_en: Option<String>,
    pub slug: String,
    pub tag_type: String,
    pub usage_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Tag {
    pub fn localized(&self, locale: Locale) -> LocalizedTag {
        LocalizedTag {
            id: self.id,
            name: locale::pick(locale, &self.name_ko, self.name_en.as_deref()).to_string(),
            slug: self.slug.clone(),
            tag_type: self.tag_type.clone(),
        }
    }
}

/// A tag together with the ids of its related tags.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagDetail {
    #[serde(flatten)]
    pub tag: Tag,
    pub related_tag_ids: Vec<DbId>,
}

/// Public, single-language tag view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedTag {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub tag_type: String,
}

/// DTO for creating a tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTag {
    pub name_ko: String,
    pub name_en: Option<String>,
    /// Derived from the names when omitted.
    pub slug: Option<String>,
    /// Defaults to `general`.
    pub tag_type: Option<String>,
    #[serde(default)]
    pub related_tag_ids: Vec<DbId>,
}

/// DTO for updating a tag. `related_tag_ids`, when present, replaces the set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTag {
    pub name_ko: Option<String>,
    pub name_en: Option<String>,
    pub slug: Option<String>,
    pub tag_type: Option<String>,
    pub related_tag_ids: Option<Vec<DbId>>,
}

/// Query parameters for `GET /api/tags`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListParams {
    #[serde(rename = "type")]
    pub tag_type: Option<String>,
    pub locale: Option<Locale>,
}
