//! Upload validation and storage naming.
//!
//! Uploads are a validated pass-through: the bytes are written unchanged,
//! so everything here is about deciding whether to accept a file and where
//! to put it.

use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// Maximum accepted upload size (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Folder used when the client does not send one.
pub const DEFAULT_FOLDER: &str = "general";

/// URL prefix the upload root is served under.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Accepted MIME types and the extensions each may be stored under. The
/// first extension is canonical.
const ALLOWED_TYPES: &[(&str, &[&str])] = &[
    ("image/jpeg", &["jpg", "jpeg"]),
    ("image/png", &["png"]),
    ("image/gif", &["gif"]),
    ("image/webp", &["webp"]),
];

/// Maximum folder name length.
const MAX_FOLDER_LEN: usize = 64;

/// Reject files with a disallowed MIME type or over the size ceiling.
pub fn validate_upload(mime_type: &str, size: usize) -> Result<(), CoreError> {
    if !is_allowed_type(mime_type) {
        return Err(CoreError::Validation(
            "지원하지 않는 파일 형식입니다. (JPEG, PNG, GIF, WebP만 가능)".into(),
        ));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "파일 크기는 10MB를 초과할 수 없습니다.".into(),
        ));
    }
    if size == 0 {
        return Err(CoreError::Validation("빈 파일은 업로드할 수 없습니다.".into()));
    }
    Ok(())
}

pub fn is_allowed_type(mime_type: &str) -> bool {
    canonical_extension(mime_type).is_some()
}

/// Canonical extension for an allowed MIME type.
pub fn canonical_extension(mime_type: &str) -> Option<&'static str> {
    allowed_extensions(mime_type).first().copied()
}

fn allowed_extensions(mime_type: &str) -> &'static [&'static str] {
    let normalized = mime_type.trim().to_ascii_lowercase();
    ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| *mime == normalized)
        .map(|(_, exts)| *exts)
        .unwrap_or(&[])
}

/// Normalize the client-supplied folder into a single safe path segment.
///
/// Keeps `[a-z0-9_-]` (lowercased), drops everything else, and falls back
/// to [`DEFAULT_FOLDER`] when nothing usable remains. Path separators and
/// dots never survive, so the result cannot escape the upload root.
pub fn sanitize_folder(folder: Option<&str>) -> String {
    let cleaned: String = folder
        .unwrap_or_default()
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            (c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_').then_some(c)
        })
        .take(MAX_FOLDER_LEN)
        .collect();

    if cleaned.is_empty() {
        DEFAULT_FOLDER.to_string()
    } else {
        cleaned
    }
}

/// Extension for the stored file: the original one when it belongs to the
/// MIME type's family, otherwise the canonical extension.
pub fn stored_extension(original_name: &str, mime_type: &str) -> String {
    let family = allowed_extensions(mime_type);

    original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| family.contains(&ext.as_str()))
        .unwrap_or_else(|| canonical_extension(mime_type).unwrap_or("bin").to_string())
}

/// Collision-resistant stored file name: `<unix millis>-<uuid>.<ext>`.
pub fn generate_filename(original_name: &str, mime_type: &str, now: Timestamp, id: Uuid) -> String {
    format!(
        "{}-{}.{}",
        now.timestamp_millis(),
        id.simple(),
        stored_extension(original_name, mime_type)
    )
}

/// Public URL of a stored file.
pub fn public_url(folder: &str, filename: &str) -> String {
    format!("{PUBLIC_PREFIX}/{folder}/{filename}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepts_small_png() {
        assert!(validate_upload("image/png", 1024).is_ok());
    }

    #[test]
    fn rejects_oversized_file() {
        assert!(validate_upload("image/jpeg", MAX_UPLOAD_BYTES + 1).is_err());
        assert!(validate_upload("image/jpeg", MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn rejects_disallowed_type() {
        assert!(validate_upload("application/pdf", 10).is_err());
        assert!(validate_upload("image/svg+xml", 10).is_err());
    }

    #[test]
    fn folder_cannot_traverse() {
        assert_eq!(sanitize_folder(Some("../../etc")), "etc");
        assert_eq!(sanitize_folder(Some("Press/2024")), "press2024");
        assert_eq!(sanitize_folder(Some("...")), DEFAULT_FOLDER);
        assert_eq!(sanitize_folder(None), DEFAULT_FOLDER);
    }

    #[test]
    fn extension_preserved_or_derived() {
        assert_eq!(stored_extension("Photo.JPEG", "image/jpeg"), "jpeg");
        assert_eq!(stored_extension("noext", "image/webp"), "webp");
        assert_eq!(stored_extension("weird.p/ng", "image/png"), "png");
    }

    #[test]
    fn extension_outside_mime_family_is_replaced() {
        assert_eq!(stored_extension("evil.html", "image/png"), "png");
        assert_eq!(stored_extension("evil.svg", "image/png"), "png");
        assert_eq!(stored_extension("photo.png", "image/jpeg"), "jpg");
        assert_eq!(stored_extension("photo.jpg", "image/jpeg"), "jpg");
        assert!(generate_filename("x.htm", "image/gif", chrono::Utc::now(), Uuid::nil()).ends_with(".gif"));
    }

    #[test]
    fn generated_name_is_unique_per_id() {
        let now = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let a = generate_filename("a.png", "image/png", now, Uuid::new_v4());
        let b = generate_filename("a.png", "image/png", now, Uuid::new_v4());
        assert_ne!(a, b);
        assert!(a.starts_with(&format!("{}-", now.timestamp_millis())));
        assert!(a.ends_with(".png"));
    }

    #[test]
    fn public_url_under_folder() {
        assert_eq!(public_url("press", "x.png"), "/uploads/press/x.png");
    }
}
