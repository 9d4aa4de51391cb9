//! Shared response envelope types for API handlers.
//!
//! Every success response is `{ "success": true, "data": ... }`; paginated
//! listings add `"pagination": { page, limit, total }`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
}

impl<T: Serialize> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            data,
            pagination: Some(pagination),
        }
    }
}

/// Body of responses that carry no payload beyond the success flag.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self { success: true, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_omitted_when_absent() {
        let value = serde_json::to_value(DataResponse::ok(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({ "success": true, "data": [1, 2] }));
    }

    #[test]
    fn pagination_included_when_present() {
        let page = Pagination { page: 2, limit: 10, total: 31 };
        let value = serde_json::to_value(DataResponse::paginated(Vec::<i32>::new(), page)).unwrap();
        assert_eq!(value["pagination"]["total"], 31);
        assert_eq!(value["pagination"]["page"], 2);
    }
}
