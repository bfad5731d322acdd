//! Input checks and result normalization shared by the task handlers

use url::Url;

use super::traits::{TaskError, TaskKind};

/// Prefix a leaf client uses to return an error through a success value
pub const ERROR_SENTINEL: &str = "Error:";

pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Absolute http(s) URL with a host
pub fn validate_http_url(task: TaskKind, url: &str) -> Result<(), TaskError> {
    if url.is_empty() || !is_http_url(url) {
        return Err(TaskError::validation(
            task,
            "Invalid URL. Must start with http:// or https://",
        ));
    }

    let parsed = Url::parse(url)
        .map_err(|e| TaskError::validation(task, format!("Invalid URL: {}", e)))?;
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(TaskError::validation(task, "Invalid URL: missing host"));
    }

    Ok(())
}

pub fn require_non_blank(task: TaskKind, value: &str, message: &str) -> Result<(), TaskError> {
    if value.trim().is_empty() {
        return Err(TaskError::validation(task, message));
    }
    Ok(())
}

/// Surface an `"Error:"`-prefixed value as an upstream failure
pub fn reject_sentinel(task: TaskKind, value: String) -> Result<String, TaskError> {
    if value.starts_with(ERROR_SENTINEL) {
        return Err(TaskError::upstream(task, value));
    }
    Ok(value)
}

/// First `max_chars` characters of `text`, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
