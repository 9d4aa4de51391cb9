//! URL slug generation and validation.

use crate::error::CoreError;

/// Maximum slug length in characters.
pub const MAX_SLUG_LEN: usize = 120;

/// Build a URL slug from free text.
///
/// Keeps ASCII letters and digits (lowercased), collapses every other run of
/// characters into a single `-`, and trims leading/trailing hyphens. Hangul
/// and other non-ASCII text is dropped, so callers should prefer the English
/// name as the source when one exists.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Validate a caller-supplied slug: lowercase ASCII alphanumerics separated
/// by single hyphens.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    let well_formed = !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "잘못된 슬러그입니다: '{slug}'. 영문 소문자, 숫자, 하이픈(-)만 사용할 수 있습니다."
        )))
    }
}

/// Resolve the slug for a new record: the explicit one if given, otherwise
/// derived from the first source that produces a non-empty slug.
pub fn resolve_slug(explicit: Option<&str>, sources: &[Option<&str>]) -> Result<String, CoreError> {
    if let Some(slug) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        validate_slug(slug)?;
        return Ok(slug.to_string());
    }

    sources
        .iter()
        .flatten()
        .map(|s| slugify(s))
        .find(|s| !s.is_empty())
        .ok_or_else(|| {
            CoreError::Validation("이름에 영문이 없으면 슬러그를 직접 입력해야 합니다.".into())
        })
}
