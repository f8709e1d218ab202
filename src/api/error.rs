//! HTTP error responses.
//!
//! Wire shape is the client's existing contract: `{"error": "<message>"}`.
//! Provider and signing failures surface as a generic 500; the specific
//! cause is logged server-side only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// An HTTP error with its status code.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    body: ApiErrorBody,
}

impl ApiError {
    /// Create a bad request error (400).
    pub fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ApiErrorBody {
                error: message.to_string(),
            },
        }
    }

    /// Create an internal error (500) with a generic message.
    pub fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ApiErrorBody {
                error: message.to_string(),
            },
        }
    }

}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::bad_request("Conference id is required");
        assert_eq!(error.body.error, "Conference id is required");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_internal_status() {
        let response = ApiError::internal("Failed to fetch conferences").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_body_shape() {
        let error = ApiError::internal("Failed to generate token");
        let json = serde_json::to_value(&error.body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Failed to generate token"}));
    }
}
