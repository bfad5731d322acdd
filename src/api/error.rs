use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use super::models::{ErrorResponse, FieldError};
use crate::handlers::{DispatchError, TaskError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request format")]
    InvalidRequest(Vec<FieldError>),
    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error(transparent)]
    Task(#[from] TaskError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("Failed to load web interface")]
    InterfaceUnavailable,
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Single-entry 422 for a request-level problem
    pub fn invalid(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        ApiError::InvalidRequest(vec![FieldError {
            loc: loc.iter().map(|part| part.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }])
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Dispatch(_) => StatusCode::BAD_REQUEST,
            ApiError::Task(_) | ApiError::InterfaceUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let detail = self.to_string();

        let body = match self {
            ApiError::InvalidRequest(errors) => ErrorResponse {
                detail,
                errors: Some(errors),
                message: None,
            },
            ApiError::Internal(message) => ErrorResponse {
                detail,
                errors: None,
                message: Some(message),
            },
            _ => ErrorResponse {
                detail,
                errors: None,
                message: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::TaskKind;
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_task_error_is_500_with_detail() {
        let err = TaskError::validation(TaskKind::WebsiteAnalysis, "Empty prompt provided");
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Analysis failed: Empty prompt provided"}));
    }

    #[tokio::test]
    async fn test_dispatch_error_is_400() {
        let (status, body) = render(DispatchError::NoMatchingRoute.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().starts_with("Please specify a valid request type"));
    }

    #[tokio::test]
    async fn test_invalid_request_lists_errors() {
        let err = ApiError::invalid(&["body", "url"], "Field required", "missing");
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "detail": "Invalid request format",
                "errors": [{"loc": ["body", "url"], "msg": "Field required", "type": "missing"}]
            })
        );
    }

    #[tokio::test]
    async fn test_internal_error_carries_message() {
        let (status, body) = render(ApiError::Internal("boom".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"detail": "Internal server error", "message": "boom"}));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::PayloadTooLarge(10).status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            ApiError::InterfaceUnavailable.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
