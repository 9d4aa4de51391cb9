//! Site locales and bilingual field selection.
//!
//! Every translatable column is stored twice (`*_ko`, `*_en`). Korean is the
//! primary language and always present; English is optional and falls back
//! to Korean when missing or blank.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A supported site locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

impl Locale {
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::Ko => "ko",
            Locale::En => "en",
        }
    }

    /// Open Graph locale tag (`ko_KR`, `en_US`).
    pub fn og_locale(self) -> &'static str {
        match self {
            Locale::Ko => "ko_KR",
            Locale::En => "en_US",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ko" => Ok(Locale::Ko),
            "en" => Ok(Locale::En),
            other => Err(CoreError::Validation(format!(
                "지원하지 않는 언어입니다: '{other}'. ko 또는 en만 가능합니다."
            ))),
        }
    }
}

/// Select the text for `locale`.
///
/// English is returned only when requested and non-blank; everything else
/// resolves to the Korean value.
pub fn pick<'a>(locale: Locale, ko: &'a str, en: Option<&'a str>) -> &'a str {
    match (locale, en) {
        (Locale::En, Some(en)) if !en.trim().is_empty() => en,
        _ => ko,
    }
}

/// Like [`pick`] for optional Korean values (e.g. subtitles).
pub fn pick_opt<'a>(locale: Locale, ko: Option<&'a str>, en: Option<&'a str>) -> Option<&'a str> {
    match (locale, en) {
        (Locale::En, Some(en)) if !en.trim().is_empty() => Some(en),
        _ => ko,
    }
}
