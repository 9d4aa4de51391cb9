//! Customer inquiry model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use sonaverse_core::types::{DbId, Timestamp};

/// A row from the `inquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: DbId,
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: String,
    pub message: String,
    pub locale: String,
    pub ip_address: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for storing a validated submission.
#[derive(Debug, Clone)]
pub struct CreateInquiry {
    pub name: String,
    pub company: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub inquiry_type: String,
    pub message: String,
    pub locale: String,
    pub ip_address: Option<String>,
}
