//! Repository layer: one zero-sized struct per table group.
//!
//! Every method takes a pool (or a connection when it must join a caller's
//! transaction) and returns `sqlx::Error`; mapping to HTTP happens in the api
//! crate.

pub mod admin_session_repo;
pub mod admin_user_repo;
pub mod history_repo;
pub mod image_repo;
pub mod inquiry_repo;
pub mod press_repo;
pub mod product_repo;
pub mod rate_limit_repo;
pub mod settings_repo;
pub mod story_repo;
pub mod tag_repo;

pub use admin_session_repo::AdminSessionRepo;
pub use admin_user_repo::AdminUserRepo;
pub use history_repo::HistoryRepo;
pub use image_repo::ImageRepo;
pub use inquiry_repo::InquiryRepo;
pub use press_repo::PressRepo;
pub use product_repo::{ProductCategoryRepo, ProductImageRepo, ProductRepo};
pub use rate_limit_repo::RateLimitRepo;
pub use settings_repo::SettingsRepo;
pub use story_repo::StoryRepo;
pub use tag_repo::TagRepo;

/// Default page size for paginated listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on any requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Normalize 1-based `page` / `limit` query values into `(page, limit, offset)`.
///
/// The offset saturates, so an absurd page yields an empty page.
pub fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit, (page - 1).saturating_mul(limit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_defaults_and_clamps() {
        assert_eq!(page_window(None, None), (1, 10, 0));
        assert_eq!(page_window(Some(3), Some(20)), (3, 20, 40));
        assert_eq!(page_window(Some(0), Some(1000)), (1, 100, 0));
        assert_eq!(page_window(Some(-2), Some(0)), (1, 1, 0));
    }

    #[test]
    fn huge_page_saturates_offset() {
        assert_eq!(page_window(Some(i64::MAX), Some(100)), (i64::MAX, 100, i64::MAX));
    }
}
