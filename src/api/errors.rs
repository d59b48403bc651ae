use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::errors::WstgkitError;

impl IntoResponse for WstgkitError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            WstgkitError::NotFound(_) => StatusCode::NOT_FOUND,
            WstgkitError::Validation(_) => StatusCode::BAD_REQUEST,
            WstgkitError::Config(_) => StatusCode::BAD_REQUEST,
            WstgkitError::RateLimit(_) => StatusCode::TOO_MANY_REQUESTS,
            WstgkitError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            WstgkitError::LLMApi(_) | WstgkitError::Network(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
