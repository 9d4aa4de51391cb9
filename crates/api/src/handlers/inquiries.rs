//! Handlers for customer inquiries.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sonaverse_core::content::{parse_optional, InquiryStatus};
use sonaverse_core::error::CoreError;
use sonaverse_core::locale::Locale;
use sonaverse_core::types::DbId;
use sonaverse_db::models::inquiry::CreateInquiry;
use sonaverse_db::repositories::{page_window, InquiryRepo};
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::RequireAdmin;
use crate::middleware::client::ClientInfo;
use crate::rate_limit::RateLimitScope;
use crate::response::{DataResponse, Pagination};
use crate::state::AppState;

/// Body of `POST /api/inquiries`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InquiryRequest {
    #[validate(length(min = 1, max = 50, message = "이름을 입력해주세요. (50자 이내)"))]
    pub name: String,
    #[validate(length(max = 100, message = "회사명은 100자 이내로 입력해주세요."))]
    pub company: Option<String>,
    #[validate(email(message = "올바른 이메일 주소를 입력해주세요."))]
    pub email: String,
    #[validate(length(max = 30, message = "전화번호는 30자 이내로 입력해주세요."))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 50, message = "문의 유형을 선택해주세요."))]
    pub inquiry_type: String,
    #[validate(length(min = 10, max = 5000, message = "문의 내용은 10자 이상 5000자 이내로 입력해주세요."))]
    pub message: String,
    pub locale: Option<Locale>,
}

#[derive(Debug, Deserialize)]
pub struct InquiryListParams {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInquiryStatus {
    pub status: String,
}

/// First field message of a failed validation.
fn validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "입력값을 확인해주세요.".to_string())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// POST /api/inquiries
///
/// Public, rate limited per client IP.
pub async fn submit_inquiry(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<InquiryRequest>,
) -> AppResult<impl IntoResponse> {
    state
        .rate_limiter
        .enforce(RateLimitScope::Inquiry, &client.ip)
        .await?;

    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(validation_message(&e))))?;

    let inquiry = InquiryRepo::create(
        &state.pool,
        &CreateInquiry {
            name: input.name.trim().to_string(),
            company: trimmed(input.company),
            email: input.email.trim().to_lowercase(),
            phone: trimmed(input.phone),
            inquiry_type: input.inquiry_type.trim().to_string(),
            message: input.message.trim().to_string(),
            locale: input.locale.unwrap_or_default().as_str().to_string(),
            ip_address: client.known_ip(),
        },
    )
    .await?;

    tracing::info!(inquiry_id = inquiry.id, inquiry_type = %inquiry.inquiry_type, "Inquiry received");
    Ok(Json(DataResponse::ok(inquiry)))
}

/// GET /api/admin/inquiries?status=&page=&limit=
pub async fn list_inquiries(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<InquiryListParams>,
) -> AppResult<impl IntoResponse> {
    let status = parse_optional::<InquiryStatus>(params.status.as_deref())?;
    let (page, limit, offset) = page_window(params.page, params.limit);

    let (rows, total) = InquiryRepo::list(&state.pool, status, limit, offset).await?;
    Ok(Json(DataResponse::paginated(rows, Pagination { page, limit, total })))
}

/// PUT /api/admin/inquiries/{id}/status
pub async fn update_inquiry_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(inquiry_id): Path<DbId>,
    Json(input): Json<UpdateInquiryStatus>,
) -> AppResult<impl IntoResponse> {
    let status: InquiryStatus = input.status.parse()?;
    let inquiry = InquiryRepo::update_status(&state.pool, inquiry_id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inquiry",
            id: inquiry_id,
        }))?;

    tracing::info!(inquiry_id, status = %status, user_id = admin.user_id, "Inquiry status changed");
    Ok(Json(DataResponse::ok(inquiry)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, message: &str) -> InquiryRequest {
        InquiryRequest {
            name: "홍길동".into(),
            company: None,
            email: email.into(),
            phone: None,
            inquiry_type: "product".into(),
            message: message.into(),
            locale: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request("buyer@example.com", "보행 보조기 구매 문의드립니다.").validate().is_ok());
    }

    #[test]
    fn bad_email_reports_localized_message() {
        let errors = request("not-an-email", "보행 보조기 구매 문의드립니다.")
            .validate()
            .unwrap_err();
        assert_eq!(validation_message(&errors), "올바른 이메일 주소를 입력해주세요.");
    }

    #[test]
    fn short_message_rejected() {
        assert!(request("buyer@example.com", "짧음").validate().is_err());
    }
}
