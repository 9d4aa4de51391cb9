//! Admin user model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use sonaverse_core::types::{DbId, Timestamp};

/// A row from the `admin_users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: DbId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new admin user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateAdminUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
}
