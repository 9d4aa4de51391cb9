//! Soft-delete state decoded from a nullable `deleted_at` column.
//!
//! Rows never expose a bare `deleted_at: Option<_>`; they carry a
//! [`DeletionState`] so callers match on the state instead of testing field
//! presence.

use serde::Serialize;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Sqlite, Type, ValueRef};
use sonaverse_core::types::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeletionState {
    Active,
    Deleted { at: Timestamp },
}

impl DeletionState {
    pub fn is_deleted(&self) -> bool {
        matches!(self, DeletionState::Deleted { .. })
    }

    pub fn deleted_at(&self) -> Option<Timestamp> {
        match self {
            DeletionState::Active => None,
            DeletionState::Deleted { at } => Some(*at),
        }
    }
}

impl Type<Sqlite> for DeletionState {
    fn type_info() -> SqliteTypeInfo {
        <Timestamp as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <Timestamp as Type<Sqlite>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Sqlite> for DeletionState {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(DeletionState::Active);
        }
        let at = <Timestamp as Decode<'r, Sqlite>>::decode(value)?;
        Ok(DeletionState::Deleted { at })
    }
}
