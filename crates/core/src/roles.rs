//! Well-known admin role names.
//!
//! These must match the `CHECK` constraint on `admin_users.role`.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_EDITOR: &str = "editor";

/// All assignable roles.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_EDITOR];
