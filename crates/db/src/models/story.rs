//! Sonaverse story models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::tag::{LocalizedTag, Tag};
use crate::models::DeletionState;

/// A row from the `stories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub id: DbId,
    pub slug: String,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    pub body_ko: String,
    pub body_en: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_main: bool,
    pub is_published: bool,
    pub published_at: Timestamp,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at")]
    pub deletion: DeletionState,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryWithTags {
    #[serde(flatten)]
    pub story: Story,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedStory {
    pub id: DbId,
    pub slug: String,
    pub title: String,
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_main: bool,
    pub published_at: Timestamp,
    pub tags: Vec<LocalizedTag>,
}

impl StoryWithTags {
    pub fn localized(&self, locale: Locale, include_body: bool) -> LocalizedStory {
        let s = &self.story;
        LocalizedStory {
            id: s.id,
            slug: s.slug.clone(),
            title: locale::pick(locale, &s.title_ko, s.title_en.as_deref()).to_string(),
            summary: locale::pick_opt(locale, s.summary_ko.as_deref(), s.summary_en.as_deref())
                .map(str::to_string),
            body: include_body
                .then(|| locale::pick(locale, &s.body_ko, s.body_en.as_deref()).to_string()),
            thumbnail_url: s.thumbnail_url.clone(),
            youtube_url: s.youtube_url.clone(),
            is_main: s.is_main,
            published_at: s.published_at,
            tags: self.tags.iter().map(|t| t.localized(locale)).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStory {
    pub slug: Option<String>,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    #[serde(default)]
    pub body_ko: String,
    pub body_en: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default)]
    pub is_published: bool,
    pub published_at: Option<Timestamp>,
    #[serde(default)]
    pub tag_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStory {
    pub slug: Option<String>,
    pub title_ko: Option<String>,
    pub title_en: Option<String>,
    pub summary_ko: Option<String>,
    pub summary_en: Option<String>,
    pub body_ko: Option<String>,
    pub body_en: Option<String>,
    pub thumbnail_url: Option<String>,
    pub youtube_url: Option<String>,
    pub is_main: Option<bool>,
    pub is_published: Option<bool>,
    pub published_at: Option<Timestamp>,
    pub tag_ids: Option<Vec<DbId>>,
}
