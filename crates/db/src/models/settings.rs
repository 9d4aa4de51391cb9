//! Site-wide settings singleton.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sonaverse_core::types::Timestamp;

/// Primary key of the only settings row.
pub const SETTINGS_KEY: i64 = 1;

/// The `settings` row.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing)]
    pub id: i64,
    pub company_name_ko: Option<String>,
    pub company_name_en: Option<String>,
    pub address_ko: Option<String>,
    pub address_en: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub business_hours_ko: Option<String>,
    pub business_hours_en: Option<String>,
    pub youtube_url: Option<String>,
    pub instagram_url: Option<String>,
    pub blog_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for `PUT /api/admin/settings`. Absent fields keep their value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettings {
    pub company_name_ko: Option<String>,
    pub company_name_en: Option<String>,
    pub address_ko: Option<String>,
    pub address_en: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub business_hours_ko: Option<String>,
    pub business_hours_en: Option<String>,
    pub youtube_url: Option<String>,
    pub instagram_url: Option<String>,
    pub blog_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub facebook_url: Option<String>,
}
