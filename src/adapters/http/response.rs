//! JSON response envelope shared by every endpoint.
//!
//! ```json
//! { "success": true, "message": "...", "data": { ... } }
//! { "success": false, "error": "...", "code": "POLL_NOT_FOUND" }
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::foundation::ErrorCode;

/// Standard API response body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ApiResponse<()> {
    /// Success carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
            code: None,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(message.into()),
            code: Some(code.to_string()),
        }
    }
}

/// Serializes `body` with `status`.
pub fn respond<T: Serialize>(status: StatusCode, body: ApiResponse<T>) -> Response {
    (status, Json(body)).into_response()
}

/// 400 with a validation code, for input rejected before reaching a handler.
pub fn bad_request(message: impl Into<String>) -> Response {
    respond(
        StatusCode::BAD_REQUEST,
        ApiResponse::error(ErrorCode::ValidationFailed, message),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_omits_error_fields() {
        let body = ApiResponse::data(vec![1, 2]).with_message("ok");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "ok");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("error").is_none());
        assert!(json.get("code").is_none());
    }

    #[test]
    fn error_carries_code_and_no_data() {
        let body = ApiResponse::error(ErrorCode::PollNotFound, "Poll not found");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Poll not found");
        assert_eq!(json["code"], "POLL_NOT_FOUND");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn bad_request_is_400() {
        assert_eq!(bad_request("nope").status(), StatusCode::BAD_REQUEST);
    }
}
