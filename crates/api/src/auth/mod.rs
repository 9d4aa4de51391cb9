//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Signed session tokens and refresh-token helpers.
//! - [`cookie`] -- The `admin-session` cookie carrying the session token.

pub mod cookie;
pub mod jwt;
pub mod password;
