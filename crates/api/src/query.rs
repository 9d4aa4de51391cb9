//! Shared query parameter types for API handlers.

use serde::Deserialize;
use sonaverse_core::locale::Locale;

/// `?locale=ko|en`, defaulting to Korean.
#[derive(Debug, Default, Deserialize)]
pub struct LocaleParams {
    pub locale: Option<Locale>,
}

impl LocaleParams {
    pub fn locale(&self) -> Locale {
        self.locale.unwrap_or_default()
    }
}

/// 1-based pagination (`?page=&limit=`), normalized by
/// [`sonaverse_db::repositories::page_window`].
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}
