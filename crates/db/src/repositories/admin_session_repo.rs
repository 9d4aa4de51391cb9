//! Repository for the `admin_sessions` table.

use chrono::Utc;
use sonaverse_core::types::{DbId, Timestamp};

use crate::models::admin_session::{AdminSession, CreateAdminSession, RevocationReason};
use crate::DbPool;

const COLUMNS: &str = "\
    id, user_id, access_token_hash, refresh_token_hash, ip_address, user_agent, \
    device_type, browser, os, country, city, expires_at, refresh_expires_at, \
    created_at, last_used_at, revoked_at, revoked_reason";

pub struct AdminSessionRepo;

impl AdminSessionRepo {
    pub async fn create(pool: &DbPool, input: &CreateAdminSession) -> Result<AdminSession, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO admin_sessions \
                (user_id, access_token_hash, refresh_token_hash, ip_address, user_agent, \
                 device_type, browser, os, country, city, expires_at, refresh_expires_at, \
                 created_at, last_used_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(input.user_id)
            .bind(&input.access_token_hash)
            .bind(&input.refresh_token_hash)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(&input.device_type)
            .bind(&input.browser)
            .bind(&input.os)
            .bind(&input.country)
            .bind(&input.city)
            .bind(input.expires_at)
            .bind(input.refresh_expires_at)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE id = ?1");
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a session by access-token hash. Validity is left to the caller
    /// ([`AdminSession::is_valid_at`]).
    pub async fn find_by_access_hash(
        pool: &DbPool,
        access_token_hash: &str,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE access_token_hash = ?1");
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(access_token_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_refresh_hash(
        pool: &DbPool,
        refresh_token_hash: &str,
    ) -> Result<Option<AdminSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_sessions WHERE refresh_token_hash = ?1");
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(refresh_token_hash)
            .fetch_optional(pool)
            .await
    }

    pub async fn touch(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE admin_sessions SET last_used_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Revoke a session. Returns `false` when it was missing or already revoked.
    pub async fn revoke(pool: &DbPool, id: DbId, reason: RevocationReason) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE admin_sessions SET revoked_at = ?2, revoked_reason = ?3 \
             WHERE id = ?1 AND revoked_at IS NULL",
        )
        .bind(id)
        .bind(Utc::now())
        .bind(reason.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Unrevoked, unexpired sessions of one user, most recently used first.
    pub async fn list_active_for_user(
        pool: &DbPool,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<AdminSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM admin_sessions \
             WHERE user_id = ?1 AND revoked_at IS NULL AND expires_at > ?2 \
             ORDER BY last_used_at DESC"
        );
        sqlx::query_as::<_, AdminSession>(&query)
            .bind(user_id)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Delete sessions that can no longer be used: past their refresh expiry,
    /// or revoked and past their access expiry. Returns the number removed.
    pub async fn purge_expired(pool: &DbPool, now: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM admin_sessions \
             WHERE refresh_expires_at <= ?1 \
                OR (revoked_at IS NOT NULL AND expires_at <= ?1)",
        )
        .bind(now)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
