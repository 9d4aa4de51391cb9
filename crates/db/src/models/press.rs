//! Press release models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::tag::{LocalizedTag, Tag};
use crate::models::DeletionState;

/// A row from the `press_releases` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PressRelease {
    pub id: DbId,
    pub slug: String,
    pub press_name_ko: Option<String>,
    pub press_name_en: Option<String>,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    pub body_ko: String,
    pub body_en: Option<String>,
    pub external_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_at: Timestamp,
    pub is_published: bool,
    pub is_active: bool,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at")]
    pub deletion: DeletionState,
}

/// Admin view: the row plus its tags.
#[derive(Debug, Clone, Serialize)]
pub struct PressWithTags {
    #[serde(flatten)]
    pub press: PressRelease,
    pub tags: Vec<Tag>,
}

/// Public single-language press release.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedPress {
    pub id: DbId,
    pub slug: String,
    pub press_name: Option<String>,
    pub title: String,
    pub summary: Option<String>,
    /// Omitted from list responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub external_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_at: Timestamp,
    pub tags: Vec<LocalizedTag>,
}

impl PressWithTags {
    pub fn localized(&self, locale: Locale, include_body: bool) -> LocalizedPress {
        let p = &self.press;
        LocalizedPress {
            id: p.id,
            slug: p.slug.clone(),
            press_name: locale::pick_opt(locale, p.press_name_ko.as_deref(), p.press_name_en.as_deref())
                .map(str::to_string),
            title: locale::pick(locale, &p.title_ko, p.title_en.as_deref()).to_string(),
            summary: locale::pick_opt(locale, p.summary_ko.as_deref(), p.summary_en.as_deref())
                .map(str::to_string),
            body: include_body
                .then(|| locale::pick(locale, &p.body_ko, p.body_en.as_deref()).to_string()),
            external_url: p.external_url.clone(),
            thumbnail_url: p.thumbnail_url.clone(),
            published_at: p.published_at,
            tags: self.tags.iter().map(|t| t.localized(locale)).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePress {
    pub slug: Option<String>,
    pub press_name_ko: Option<String>,
    pub press_name_en: Option<String>,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    #[serde(default)]
    pub body_ko: String,
    pub body_en: Option<String>,
    pub external_url: Option<String>,
    pub thumbnail_url: Option<String>,
    /// Defaults to now.
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub is_published: bool,
    pub is_active: Option<bool>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

/// Update DTO. `tag_ids`, when present, replaces the tag set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePress {
    pub slug: Option<String>,
    pub press_name_ko: Option<String>,
    pub press_name_en: Option<String>,
    pub title_ko: Option<String>,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    pub body_ko: Option<String>,
    pub body_en: Option<String>,
    pub external_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub published_at: Option<Timestamp>,
    pub is_published: Option<bool>,
    pub is_active: Option<bool>,
    pub tag_ids: Option<Vec<DbId>>,
}

/// Filters shared by the public press and story listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicListParams {
    pub locale: Option<Locale>,
    /// 1-based page number.
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Tag slug.
    pub tag: Option<String>,
    /// Stories only: restrict to main stories.
    pub main: Option<bool>,
}
