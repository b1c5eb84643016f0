use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use meallog_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorResponse {
    code: String,
    message: String,
    status: i64,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "E_UNAUTHORIZED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let error_response = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16() as i64,
        };

        let body = serde_json::to_string(&error_response).unwrap_or_else(|_| {
            r#"{"code":"E_INTERNAL_SERVER_ERROR","message":"Failed to serialize error response"}"#
                .to_string()
        });

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(body.clone().into())
            .unwrap_or_else(|_| Response::new(body.into()))
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::InvalidImage(_) | CoreError::InvalidQuery => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::Unauthorized => ApiError::Unauthorized(error.to_string()),
            CoreError::NotFound => ApiError::NotFound(error.to_string()),
            CoreError::RateLimited
            | CoreError::UpstreamError(_)
            | CoreError::MalformedResponse(_)
            | CoreError::InternalServerError => ApiError::InternalServerError(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_correctable_errors_are_bad_requests() {
        assert_eq!(
            ApiError::from(CoreError::InvalidImage("missing".to_string())),
            ApiError::BadRequest("Invalid image format or URL: missing".to_string())
        );
        assert!(matches!(
            ApiError::from(CoreError::InvalidQuery),
            ApiError::BadRequest(_)
        ));
    }

    #[test]
    fn test_rate_limited_keeps_distinct_retry_message() {
        let error = ApiError::from(CoreError::RateLimited);
        assert_eq!(
            error,
            ApiError::InternalServerError(
                "API rate limit exceeded. Please try again later.".to_string()
            )
        );
    }

    #[test]
    fn test_upstream_failures_map_to_500() {
        let (status, _) =
            ApiError::from(CoreError::MalformedResponse("bad json".to_string())).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) =
            ApiError::from(CoreError::UpstreamError("boom".to_string())).status_and_code();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
