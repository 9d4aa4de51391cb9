//! Cookie-session authentication extractors for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use sonaverse_core::error::CoreError;
use sonaverse_core::roles::ROLE_ADMIN;
use sonaverse_core::types::DbId;
use sonaverse_db::repositories::AdminSessionRepo;

use crate::auth::cookie::session_from_headers;
use crate::auth::jwt::{hash_token, SessionPayload};
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated admin-panel user behind the current request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// `admin_sessions.id` of the session the cookie belongs to.
    pub session_id: DbId,
    pub user_id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl AuthUser {
    pub fn payload(&self) -> SessionPayload {
        SessionPayload {
            user_id: self.user_id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }
}

fn unauthorized() -> AppError {
    AppError::Core(CoreError::Unauthorized("로그인이 필요합니다.".into()))
}

/// Requires a signed session cookie whose stored session is neither revoked
/// nor expired. Touches the session's `last_used_at`. Rejects with 401.
///
/// ```ignore
/// async fn handler(RequireAuth(user): RequireAuth) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAuth(pub AuthUser);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let (token, payload) =
            session_from_headers(&parts.headers, &state.config.jwt).ok_or_else(unauthorized)?;

        let session = AdminSessionRepo::find_by_access_hash(&state.pool, &hash_token(&token))
            .await?
            .ok_or_else(unauthorized)?;

        if session.user_id != payload.user_id || !session.is_valid_at(Utc::now()) {
            tracing::debug!(session_id = session.id, "Rejected revoked or expired session");
            return Err(unauthorized());
        }

        AdminSessionRepo::touch(&state.pool, session.id).await?;

        Ok(RequireAuth(AuthUser {
            session_id: session.id,
            user_id: payload.user_id,
            email: payload.email,
            name: payload.name,
            role: payload.role,
        }))
    }
}

/// Requires the `admin` role on top of [`RequireAuth`]. Rejects with 403.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "관리자 권한이 필요합니다.".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
