//! Request extractors.
//!
//! - [`auth::RequireAuth`] -- a valid, unrevoked admin session.
//! - [`auth::RequireAdmin`] -- a valid session with the `admin` role.
//! - [`client::ClientInfo`] -- client IP and user agent for rate limiting
//!   and session records.

pub mod auth;
pub mod client;
