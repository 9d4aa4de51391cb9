//! Pure domain logic for the Sonaverse site backend.
//!
//! Nothing in this crate performs I/O. Database access lives in
//! `sonaverse-db` and HTTP concerns in `sonaverse-api`.

pub mod content;
pub mod device;
pub mod error;
pub mod history;
pub mod locale;
pub mod rate_limit;
pub mod roles;
pub mod seo;
pub mod slug;
pub mod types;
pub mod upload;
