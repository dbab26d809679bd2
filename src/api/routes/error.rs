//! API error handling utilities.

use crate::services::AiError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// API error response
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // No stack traces or internal detail cross the process boundary.
        let body = json!({
            "success": false,
            "message": self.message,
        });

        (self.status, axum::Json(body)).into_response()
    }
}

impl From<AiError> for ApiError {
    fn from(error: AiError) -> Self {
        let status = match &error {
            AiError::Validation(_) => StatusCode::BAD_REQUEST,
            AiError::Parse(_) | AiError::Structure(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AiError::NotFound(_) => StatusCode::NOT_FOUND,
            AiError::Permission(_) => StatusCode::FORBIDDEN,
            AiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, error.to_string())
    }
}
