//! Repository for the `inquiries` table.

use chrono::Utc;
use sonaverse_core::content::InquiryStatus;
use sonaverse_core::types::DbId;

use crate::models::inquiry::{CreateInquiry, Inquiry};
use crate::DbPool;

const COLUMNS: &str = "\
    id, name, company, email, phone, inquiry_type, message, locale, ip_address, \
    status, created_at, updated_at";

pub struct InquiryRepo;

impl InquiryRepo {
    pub async fn create(pool: &DbPool, input: &CreateInquiry) -> Result<Inquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO inquiries (name, company, email, phone, inquiry_type, message, locale, \
                                    ip_address, status, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(&input.name)
            .bind(&input.company)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.inquiry_type)
            .bind(&input.message)
            .bind(&input.locale)
            .bind(&input.ip_address)
            .bind(InquiryStatus::New.as_str())
            .bind(Utc::now())
            .fetch_one(pool)
            .await
    }

    /// Newest first, optionally filtered by status. Returns the page and the
    /// total match count.
    pub async fn list(
        pool: &DbPool,
        status: Option<InquiryStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Inquiry>, i64), sqlx::Error> {
        let status = status.map(|s| s.as_str());
        let query = format!(
            "SELECT {COLUMNS} FROM inquiries WHERE (?1 IS NULL OR status = ?1) \
             ORDER BY created_at DESC, id DESC LIMIT ?2 OFFSET ?3"
        );
        let rows = sqlx::query_as::<_, Inquiry>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM inquiries WHERE (?1 IS NULL OR status = ?1)")
            .bind(status)
            .fetch_one(pool)
            .await?;
        Ok((rows, total))
    }

    pub async fn update_status(
        pool: &DbPool,
        id: DbId,
        status: InquiryStatus,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE inquiries SET status = ?2, updated_at = ?3 WHERE id = ?1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(status.as_str())
            .bind(Utc::now())
            .fetch_optional(pool)
            .await
    }
}
