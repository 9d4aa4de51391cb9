//! Company history timeline models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::locale::{self, Locale};
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::DeletionState;

/// A row from the `history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub id: DbId,
    pub year: i64,
    pub order_index: i64,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub subtitle_ko: Option<String>,
    pub subtitle_en: Option<String>,
    pub badge_color: String,
    pub text_color: String,
    pub position: String,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[sqlx(rename = "deleted_at")]
    pub deletion: DeletionState,
}

/// A row from the `history_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: DbId,
    pub history_id: DbId,
    pub text_ko: String,
    pub text_en: Option<String>,
    pub order_index: i64,
}

/// An entry with its bullet items, ordered by `order_index`.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryWithItems {
    #[serde(flatten)]
    pub history: History,
    pub items: Vec<HistoryItem>,
}

/// Public single-language item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedHistoryItem {
    pub text: String,
    pub order: i64,
}

/// Public single-language entry (`GET /api/history`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedHistory {
    pub id: DbId,
    pub year: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub items: Vec<LocalizedHistoryItem>,
    pub badge_color: String,
    pub text_color: String,
    pub position: String,
}

impl HistoryWithItems {
    pub fn localized(&self, locale: Locale) -> LocalizedHistory {
        let h = &self.history;
        LocalizedHistory {
            id: h.id,
            year: h.year,
            title: locale::pick(locale, &h.title_ko, h.title_en.as_deref()).to_string(),
            subtitle: locale::pick_opt(locale, h.subtitle_ko.as_deref(), h.subtitle_en.as_deref())
                .map(str::to_string),
            items: self
                .items
                .iter()
                .map(|item| LocalizedHistoryItem {
                    text: locale::pick(locale, &item.text_ko, item.text_en.as_deref()).to_string(),
                    order: item.order_index,
                })
                .collect(),
            badge_color: h.badge_color.clone(),
            text_color: h.text_color.clone(),
            position: h.position.clone(),
        }
    }
}

/// Bullet item in create/update payloads.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItemInput {
    pub text_ko: String,
    pub text_en: Option<String>,
    /// Defaults to the item's position in the list.
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistory {
    pub year: i64,
    pub order: Option<i64>,
    pub title_ko: String,
    pub title_en: Option<String>,
    pub subtitle_ko: Option<String>,
    pub subtitle_en: Option<String>,
    #[serde(default)]
    pub items: Vec<HistoryItemInput>,
    pub badge_color: Option<String>,
    pub text_color: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}

/// Update DTO. `items`, when present, replaces every bullet item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHistory {
    pub year: Option<i64>,
    pub order: Option<i64>,
    pub title_ko: Option<String>,
    pub title_en: Option<String>,
    pub subtitle_ko: Option<String>,
    pub subtitle_en: Option<String>,
    pub items: Option<Vec<HistoryItemInput>>,
    pub badge_color: Option<String>,
    pub text_color: Option<String>,
    pub position: Option<String>,
    pub is_active: Option<bool>,
}
