//! The `admin-session` cookie.
//!
//! The cookie value is the signed session token from [`super::jwt`]. It is
//! http-only, `SameSite=Lax`, scoped to `/`, lives as long as the token and
//! is `Secure` only in production so local development works over plain
//! HTTP.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use cookie::time::Duration;
use cookie::{Cookie, SameSite};

use super::jwt::{verify_token, JwtConfig, SessionPayload, SESSION_TTL_DAYS};
use crate::error::{AppError, AppResult};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin-session";

fn base_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .build()
}

/// `Set-Cookie` value storing `token` for the session lifetime.
pub fn session_cookie(token: &str, secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = base_cookie(token.to_string(), secure);
    cookie.set_max_age(Duration::days(SESSION_TTL_DAYS));
    to_header(&cookie)
}

/// `Set-Cookie` value that removes the session cookie. Safe to send when the
/// client has no cookie.
pub fn clear_session_cookie(secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = base_cookie(String::new(), secure);
    cookie.make_removal();
    to_header(&cookie)
}

/// Raw session token from the request's `Cookie` headers, if any.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Read and verify the session cookie. `None` when absent or invalid.
///
/// Only checks the token signature and expiry; revocation is checked by the
/// `RequireAuth` extractor against the stored session.
pub fn session_from_headers(headers: &HeaderMap, config: &JwtConfig) -> Option<(String, SessionPayload)> {
    let token = token_from_headers(headers)?;
    let payload = verify_token(&token, config)?;
    Some((token, payload))
}

fn to_header(cookie: &Cookie<'_>) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| AppError::InternalError(format!("Invalid Set-Cookie value: {e}")))
}
