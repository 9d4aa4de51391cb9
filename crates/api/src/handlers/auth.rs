//! Handlers for `/api/admin/auth` (login, refresh, logout, me).

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use sonaverse_core::device::parse_user_agent;
use sonaverse_core::error::CoreError;
use sonaverse_core::types::Timestamp;
use sonaverse_db::models::admin_session::{CreateAdminSession, RevocationReason};
use sonaverse_db::models::admin_user::AdminUser;
use sonaverse_db::repositories::{AdminSessionRepo, AdminUserRepo};

use crate::auth::cookie::{clear_session_cookie, session_cookie, token_from_headers};
use crate::auth::jwt::{
    create_token, generate_refresh_token, hash_token, session_expiry, SessionPayload,
    REFRESH_TTL_DAYS,
};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAuth;
use crate::middleware::client::ClientInfo;
use crate::rate_limit::RateLimitScope;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

const MSG_BAD_CREDENTIALS: &str = "이메일 또는 비밀번호가 올바르지 않습니다.";
const MSG_BAD_REFRESH: &str = "세션이 만료되었습니다. 다시 로그인해주세요.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Returned by login and refresh. The session token itself only travels in
/// the cookie.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: SessionPayload,
    pub refresh_token: String,
    pub expires_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/admin/auth/login
///
/// Rate limited per client IP. Unknown emails and wrong passwords share one
/// message.
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .rate_limiter
        .enforce(RateLimitScope::Login, &client.ip)
        .await?;

    let user = AdminUserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(bad_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, ip = %client.ip, "Login rejected: wrong password");
        return Err(bad_credentials());
    }

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "비활성화된 계정입니다.".into(),
        )));
    }

    AdminUserRepo::record_login(&state.pool, user.id).await?;
    let (headers, response) = issue_session(&state, &user, &client).await?;

    tracing::info!(user_id = user.id, ip = %client.ip, "Admin logged in");
    Ok((headers, Json(DataResponse::ok(response))))
}

/// POST /api/admin/auth/refresh
///
/// Exchanges a refresh token for a new session. The old session is revoked
/// as `rotated`, so each refresh token works once.
pub async fn refresh(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<RefreshRequest>,
) -> AppResult<impl IntoResponse> {
    let session = AdminSessionRepo::find_by_refresh_hash(&state.pool, &hash_token(&input.refresh_token))
        .await?
        .filter(|s| s.can_refresh_at(Utc::now()))
        .ok_or_else(bad_refresh)?;

    // Lost race with a concurrent refresh of the same token.
    if !AdminSessionRepo::revoke(&state.pool, session.id, RevocationReason::Rotated).await? {
        return Err(bad_refresh());
    }

    let user = AdminUserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(bad_refresh)?;

    let (headers, response) = issue_session(&state, &user, &client).await?;

    tracing::info!(user_id = user.id, old_session_id = session.id, "Admin session rotated");
    Ok((headers, Json(DataResponse::ok(response))))
}

/// POST /api/admin/auth/logout
///
/// Always succeeds. Revokes the stored session when the cookie names one
/// and clears the cookie either way.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    if let Some(token) = token_from_headers(&headers) {
        if let Some(session) =
            AdminSessionRepo::find_by_access_hash(&state.pool, &hash_token(&token)).await?
        {
            if AdminSessionRepo::revoke(&state.pool, session.id, RevocationReason::Logout).await? {
                tracing::info!(session_id = session.id, user_id = session.user_id, "Admin logged out");
            }
        }
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, clear_session_cookie(state.config.is_production())?);

    Ok((response_headers, Json(MessageResponse::ok("로그아웃되었습니다."))))
}

/// GET /api/admin/auth/me
pub async fn me(RequireAuth(user): RequireAuth) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse::ok(user.payload())))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Mint a session token + refresh token for `user`, record the session and
/// build the `Set-Cookie` header.
async fn issue_session(
    state: &AppState,
    user: &AdminUser,
    client: &ClientInfo,
) -> AppResult<(HeaderMap, SessionResponse)> {
    let payload = SessionPayload {
        user_id: user.id,
        email: user.email.clone(),
        name: user.name.clone(),
        role: user.role.clone(),
    };

    let now = Utc::now();
    let token = create_token(&payload, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token creation failed: {e}")))?;
    let (refresh_token, refresh_hash) = generate_refresh_token();
    let device = parse_user_agent(client.user_agent.as_deref());
    let expires_at = session_expiry(now);

    let session = AdminSessionRepo::create(
        &state.pool,
        &CreateAdminSession {
            user_id: user.id,
            access_token_hash: hash_token(&token),
            refresh_token_hash: refresh_hash,
            ip_address: client.known_ip(),
            user_agent: client.user_agent.clone(),
            device_type: device.device_type.as_str().to_string(),
            browser: device.browser,
            os: device.os,
            country: None,
            city: None,
            expires_at,
            refresh_expires_at: now + Duration::days(REFRESH_TTL_DAYS),
        },
    )
    .await?;
    tracing::debug!(session_id = session.id, user_id = user.id, "Admin session created");

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, session_cookie(&token, state.config.is_production())?);

    Ok((
        headers,
        SessionResponse {
            user: payload,
            refresh_token,
            expires_at,
        },
    ))
}

fn bad_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(MSG_BAD_CREDENTIALS.into()))
}

fn bad_refresh() -> AppError {
    AppError::Core(CoreError::Unauthorized(MSG_BAD_REFRESH.into()))
}
