//! Admin device session model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use sonaverse_core::types::{DbId, Timestamp};

/// A row from the `admin_sessions` table.
///
/// Token columns hold SHA-256 hex digests; plaintext tokens only ever live
/// in the client's cookie / refresh payload.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub id: DbId,
    pub user_id: DbId,
    #[serde(skip_serializing)]
    pub access_token_hash: String,
    #[serde(skip_serializing)]
    pub refresh_token_hash: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
    pub created_at: Timestamp,
    pub last_used_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub revoked_reason: Option<String>,
}

impl AdminSession {
    /// A session is valid iff it was never revoked and has not expired.
    pub fn is_valid_at(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }

    /// Whether the refresh token may still be exchanged at `now`.
    pub fn can_refresh_at(&self, now: Timestamp) -> bool {
        self.revoked_at.is_none() && self.refresh_expires_at > now
    }
}

/// DTO for creating a session at login / refresh.
#[derive(Debug, Clone)]
pub struct CreateAdminSession {
    pub user_id: DbId,
    pub access_token_hash: String,
    pub refresh_token_hash: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub device_type: String,
    pub browser: String,
    pub os: String,
    pub country: Option<String>,
    pub city: Option<String>,
    pub expires_at: Timestamp,
    pub refresh_expires_at: Timestamp,
}

/// Why a session stopped being valid before its expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevocationReason {
    Logout,
    Rotated,
    RevokedByUser,
}

impl RevocationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            RevocationReason::Logout => "logout",
            RevocationReason::Rotated => "rotated",
            RevocationReason::RevokedByUser => "revoked_by_user",
        }
    }
}
