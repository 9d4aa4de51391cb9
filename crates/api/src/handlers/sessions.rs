//! Handlers for `/api/admin/sessions`: a user's signed-in devices.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use sonaverse_core::error::CoreError;
use sonaverse_core::types::DbId;
use sonaverse_db::models::admin_session::{AdminSession, RevocationReason};
use sonaverse_db::repositories::AdminSessionRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAuth;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

/// A session as shown in the device list.
#[derive(Debug, Serialize)]
pub struct SessionView {
    #[serde(flatten)]
    pub session: AdminSession,
    /// Whether this is the session making the request.
    pub current: bool,
}

/// GET /api/admin/sessions
pub async fn list_sessions(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sessions = AdminSessionRepo::list_active_for_user(&state.pool, user.user_id, Utc::now())
        .await?
        .into_iter()
        .map(|session| SessionView {
            current: session.id == user.session_id,
            session,
        })
        .collect::<Vec<_>>();

    Ok(Json(DataResponse::ok(sessions)))
}

/// DELETE /api/admin/sessions/{id}
///
/// Sessions of other users are reported as not found.
pub async fn revoke_session(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let not_found = || {
        AppError::Core(CoreError::NotFound {
            entity: "AdminSession",
            id: session_id,
        })
    };

    let session = AdminSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .filter(|s| s.user_id == user.user_id)
        .ok_or_else(not_found)?;

    if !AdminSessionRepo::revoke(&state.pool, session.id, RevocationReason::RevokedByUser).await? {
        return Err(not_found());
    }

    tracing::info!(session_id, user_id = user.user_id, "Admin session revoked");
    Ok(Json(MessageResponse::ok("세션이 종료되었습니다.")))
}
