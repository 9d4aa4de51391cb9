//! SEO metadata builders.
//!
//! Pure functions that turn content records into the metadata object the
//! page layer renders into `<head>`: title, description, canonical URL,
//! language alternates, Open Graph and Twitter card fields.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;
use crate::locale::Locale;
use crate::types::Timestamp;

/// Brand suffix appended to every page title.
pub const SITE_NAME: &str = "SONAVERSE";

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 160;

/// Fallback share image for pages without their own.
pub const DEFAULT_OG_IMAGE: &str = "/images/og-default.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub alternates: Alternates,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternates {
    pub ko: String,
    pub en: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    pub site_name: &'static str,
    pub locale: &'static str,
    #[serde(rename = "type")]
    pub og_type: &'static str,
    pub images: Vec<OgImage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

/// Static public pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticPage {
    Home,
    Products,
    Stories,
    Press,
    Inquiry,
}

impl StaticPage {
    fn path(self) -> &'static str {
        match self {
            StaticPage::Home => "",
            StaticPage::Products => "products",
            StaticPage::Stories => "sonaverse-story",
            StaticPage::Press => "press",
            StaticPage::Inquiry => "inquiry",
        }
    }

    fn copy(self, locale: Locale) -> (&'static str, &'static str) {
        match (self, locale) {
            (StaticPage::Home, Locale::Ko) => (
                "소나버스 - 시니어 라이프 케어 브랜드",
                "소나버스는 어르신의 더 나은 일상을 위한 보행 보조기와 시니어 케어 제품을 만듭니다.",
            ),
            (StaticPage::Home, Locale::En) => (
                "SONAVERSE - Senior Life Care Brand",
                "SONAVERSE builds walking aids and senior care products for a better everyday life.",
            ),
            (StaticPage::Products, Locale::Ko) => (
                "제품 소개",
                "소나버스의 보행 보조기와 시니어 케어 제품을 만나보세요.",
            ),
            (StaticPage::Products, Locale::En) => (
                "Products",
                "Discover SONAVERSE walking aids and senior care products.",
            ),
            (StaticPage::Stories, Locale::Ko) => (
                "소나버스 스토리",
                "소나버스가 전하는 브랜드와 사람들의 이야기.",
            ),
            (StaticPage::Stories, Locale::En) => (
                "SONAVERSE Stories",
                "Stories about the SONAVERSE brand and the people behind it.",
            ),
            (StaticPage::Press, Locale::Ko) => ("언론 보도", "소나버스의 최신 보도자료와 소식."),
            (StaticPage::Press, Locale::En) => ("Press", "The latest SONAVERSE press releases and news."),
            (StaticPage::Inquiry, Locale::Ko) => (
                "문의하기",
                "제품, 제휴, 구매에 관한 문의를 남겨주세요.",
            ),
            (StaticPage::Inquiry, Locale::En) => (
                "Contact Us",
                "Send us your questions about products, partnerships or purchases.",
            ),
        }
    }
}

impl fmt::Display for StaticPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StaticPage::Home => "home",
            StaticPage::Products => "products",
            StaticPage::Stories => "stories",
            StaticPage::Press => "press",
            StaticPage::Inquiry => "inquiry",
        };
        f.write_str(name)
    }
}

impl FromStr for StaticPage {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(StaticPage::Home),
            "products" => Ok(StaticPage::Products),
            "stories" => Ok(StaticPage::Stories),
            "press" => Ok(StaticPage::Press),
            "inquiry" => Ok(StaticPage::Inquiry),
            other => Err(CoreError::Validation(format!("알 수 없는 페이지입니다: '{other}'"))),
        }
    }
}

/// Content-derived metadata input, already localized by the caller.
#[derive(Debug, Clone)]
pub struct ContentSeo<'a> {
    pub title: &'a str,
    /// Summary or body text; truncated to [`MAX_DESCRIPTION_CHARS`].
    pub description: &'a str,
    /// Path below the locale prefix, e.g. `press/new-walker-launch`.
    pub path: String,
    pub image: Option<&'a str>,
    pub published_at: Option<Timestamp>,
}

/// Metadata for a static page.
pub fn page_metadata(page: StaticPage, locale: Locale, site_url: &str) -> PageMetadata {
    let (title, description) = page.copy(locale);
    let full_title = if page == StaticPage::Home {
        title.to_string()
    } else {
        format_title(title)
    };
    build(
        full_title,
        description,
        page.path(),
        None,
        None,
        "website",
        locale,
        site_url,
    )
}

/// Metadata for a press release detail page.
pub fn press_metadata(content: &ContentSeo<'_>, locale: Locale, site_url: &str) -> PageMetadata {
    article_metadata(content, locale, site_url)
}

/// Metadata for a story detail page.
pub fn story_metadata(content: &ContentSeo<'_>, locale: Locale, site_url: &str) -> PageMetadata {
    article_metadata(content, locale, site_url)
}

/// Metadata for a product detail page.
pub fn product_metadata(content: &ContentSeo<'_>, locale: Locale, site_url: &str) -> PageMetadata {
    build(
        format_title(content.title),
        content.description,
        &content.path,
        content.image,
        None,
        "website",
        locale,
        site_url,
    )
}

fn article_metadata(content: &ContentSeo<'_>, locale: Locale, site_url: &str) -> PageMetadata {
    build(
        format_title(content.title),
        content.description,
        &content.path,
        content.image,
        content.published_at,
        "article",
        locale,
        site_url,
    )
}

#[allow(clippy::too_many_arguments)]
fn build(
    title: String,
    description: &str,
    path: &str,
    image: Option<&str>,
    published_time: Option<Timestamp>,
    og_type: &'static str,
    locale: Locale,
    site_url: &str,
) -> PageMetadata {
    let base = site_url.trim_end_matches('/');
    let description = truncate_description(description);
    let canonical = localized_url(base, locale, path);
    let has_own_image = image.is_some_and(|i| !i.trim().is_empty());
    let image_url = absolute_url(base, image.filter(|_| has_own_image).unwrap_or(DEFAULT_OG_IMAGE));

    PageMetadata {
        title: title.clone(),
        description: description.clone(),
        canonical: canonical.clone(),
        alternates: Alternates {
            ko: localized_url(base, Locale::Ko, path),
            en: localized_url(base, Locale::En, path),
        },
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical,
            site_name: SITE_NAME,
            locale: locale.og_locale(),
            og_type,
            images: vec![OgImage {
                url: image_url.clone(),
                alt: title.clone(),
            }],
            published_time,
        },
        twitter: TwitterCard {
            card: if has_own_image { "summary_large_image" } else { "summary" },
            title,
            description,
            images: vec![image_url],
        },
    }
}

/// `"<title> | SONAVERSE"`.
pub fn format_title(title: &str) -> String {
    format!("{} | {SITE_NAME}", title.trim())
}

/// Collapse whitespace and cut to [`MAX_DESCRIPTION_CHARS`] on a char
/// boundary, appending an ellipsis when truncated.
pub fn truncate_description(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= MAX_DESCRIPTION_CHARS {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(MAX_DESCRIPTION_CHARS - 1).collect();
    format!("{}…", cut.trim_end())
}

fn localized_url(base: &str, locale: Locale, path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        format!("{base}/{locale}")
    } else {
        format!("{base}/{locale}/{path}")
    }
}

fn absolute_url(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{base}/{}", url.trim_start_matches('/'))
    }
}
