//! Repository for the `admin_users` table.

use chrono::Utc;
use sonaverse_core::roles::ROLE_ADMIN;
use sonaverse_core::types::DbId;

use crate::models::admin_user::{AdminUser, CreateAdminUser};
use crate::DbPool;

const COLUMNS: &str =
    "id, email, name, password_hash, role, is_active, last_login_at, created_at, updated_at";

pub struct AdminUserRepo;

impl AdminUserRepo {
    pub async fn create(pool: &DbPool, input: &CreateAdminUser) -> Result<AdminUser, sqlx::Error> {
        let now = Utc::now();
        let query = format!(
            "INSERT INTO admin_users (email, name, password_hash, role, is_active, created_at, updated_at) \
             VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(input.email.trim().to_lowercase())
            .bind(&input.name)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(now)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE id = ?1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Emails are stored lowercased, so lookups are case-insensitive.
    pub async fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<AdminUser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_users WHERE email = ?1");
        sqlx::query_as::<_, AdminUser>(&query)
            .bind(email.trim().to_lowercase())
            .fetch_optional(pool)
            .await
    }

    pub async fn count_admins(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM admin_users WHERE role = ?1")
            .bind(ROLE_ADMIN)
            .fetch_one(pool)
            .await
    }

    pub async fn record_login(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        let now = Utc::now();
        sqlx::query("UPDATE admin_users SET last_login_at = ?2, updated_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(now)
            .execute(pool)
            .await?;
        Ok(())
    }
}
