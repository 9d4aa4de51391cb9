//! Repository for the `settings` singleton row.

use chrono::Utc;

use crate::models::settings::{Settings, UpdateSettings, SETTINGS_KEY};
use crate::DbPool;

const COLUMNS: &str = "\
    id, company_name_ko, company_name_en, address_ko, address_en, phone, fax, email, \
    business_hours_ko, business_hours_en, youtube_url, instagram_url, blog_url, \
    linkedin_url, facebook_url, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    /// Return the settings row, creating an empty one on first access.
    pub async fn get(pool: &DbPool) -> Result<Settings, sqlx::Error> {
        sqlx::query("INSERT INTO settings (id, updated_at) VALUES (?1, ?2) ON CONFLICT (id) DO NOTHING")
            .bind(SETTINGS_KEY)
            .bind(Utc::now())
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM settings WHERE id = ?1");
        sqlx::query_as::<_, Settings>(&query)
            .bind(SETTINGS_KEY)
            .fetch_one(pool)
            .await
    }

    /// Patch the singleton. Absent fields keep their stored value.
    pub async fn update(pool: &DbPool, input: &UpdateSettings) -> Result<Settings, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO settings (id, company_name_ko, company_name_en, address_ko, address_en, \
                                   phone, fax, email, business_hours_ko, business_hours_en, \
                                   youtube_url, instagram_url, blog_url, linkedin_url, facebook_url, \
                                   updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16) \
             ON CONFLICT (id) DO UPDATE SET \
                company_name_ko = COALESCE(excluded.company_name_ko, company_name_ko), \
                company_name_en = COALESCE(excluded.company_name_en, company_name_en), \
                address_ko = COALESCE(excluded.address_ko, address_ko), \
                address_en = COALESCE(excluded.address_en, address_en), \
                phone = COALESCE(excluded.phone, phone), \
                fax = COALESCE(excluded.fax, fax), \
                email = COALESCE(excluded.email, email), \
                business_hours_ko = COALESCE(excluded.business_hours_ko, business_hours_ko), \
                business_hours_en = COALESCE(excluded.business_hours_en, business_hours_en), \
                youtube_url = COALESCE(excluded.youtube_url, youtube_url), \
                instagram_url = COALESCE(excluded.instagram_url, instagram_url), \
                blog_url = COALESCE(excluded.blog_url, blog_url), \
                linkedin_url = COALESCE(excluded.linkedin_url, linkedin_url), \
                facebook_url = COALESCE(excluded.facebook_url, facebook_url), \
                updated_at = excluded.updated_at \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(SETTINGS_KEY)
            .bind(&input.company_name_ko)
            .bind(&input.company_name_en)
            .bind(&input.address_ko)
            .bind(&input.address_en)
            .bind(&input.phone)
            .bind(&input.fax)
            .bind(&input.email)
            .bind(&input.business_hours_ko)
            .bind(&input.business_hours_en)
            .bind(&input.youtube_url)
            .bind(&input.instagram_url)
            .bind(&input.blog_url)
            .bind(&input.linkedin_url)
            .bind(&input.facebook_url)
            .bind(now)
            .fetch_one(pool)
            .await
    }
}
