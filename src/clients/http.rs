//! Shared HTTP plumbing for the leaf clients

use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::ClientError;
use crate::config::HttpConfig;

/// Build the outbound client. Every call is bounded by the configured timeouts
/// and never retried.
pub fn build_client(config: &HttpConfig) -> Result<Client, ClientError> {
    Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .user_agent(&config.user_agent)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| ClientError::Build {
            service: "http",
            message: e.to_string(),
        })
}

/// Map a transport failure from `send()` or body reads
pub(crate) fn request_error(service: &'static str, err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout { service }
    } else {
        ClientError::Request {
            service,
            message: err.to_string(),
        }
    }
}

/// Pass successful responses through, turn anything else into `ClientError::Status`
pub(crate) async fn ensure_success(
    service: &'static str,
    response: Response,
) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!(service, status = status.as_u16(), "Upstream returned error status");

    Err(ClientError::Status {
        service,
        status: status.as_u16(),
        message: error_message(&body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string()),
    })
}

/// Pull a human-readable message out of a provider error body.
///
/// Understands `{"error": {"message": ..}}`, `{"error": ".."}` and `{"err": ".."}`,
/// falling back to the trimmed raw text.
pub(crate) fn error_message(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        let message = value
            .pointer("/error/message")
            .or_else(|| value.get("error"))
            .or_else(|| value.get("err"))
            .and_then(Value::as_str);
        if let Some(message) = message {
            return Some(message.to_string());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(500).collect())
    }
}
