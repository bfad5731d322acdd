//! API utility functions
//!
//! Pure, stateless helpers for request processing, kept out of services.rs so
//! they can be unit tested on their own.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value, error::Category};

use super::models::FieldError;
use crate::api::error::ApiError;

/// Parses and validates Content-Type header for application/json
///
/// Accepts:
/// - `application/json`
/// - `application/json; charset=utf-8`
///
/// Rejects:
/// - `application/jsonp`
/// - `application/json-patch+json`
/// - `text/json`
/// - Malformed media types
pub fn parse_content_type(content_type: &str) -> Result<mime::Mime, ApiError> {
    let media_type: mime::Mime = content_type.parse().map_err(|_| {
        ApiError::invalid(
            &["header", "content-type"],
            format!("Invalid Content-Type: {}", content_type),
            "content_type",
        )
    })?;

    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        return Err(ApiError::invalid(
            &["header", "content-type"],
            format!(
                "Content-Type must be application/json, got: {}/{}",
                media_type.type_(),
                media_type.subtype()
            ),
            "content_type",
        ));
    }

    Ok(media_type)
}

/// Deserialize a typed request body, reporting failures as a 422 field list
pub fn parse_json_body<T: DeserializeOwned>(data: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(data).map_err(|err| ApiError::InvalidRequest(vec![field_error(&err)]))
}

/// Deserialize a free-form body that must be a JSON object
pub fn parse_json_object(data: &[u8]) -> Result<Map<String, Value>, ApiError> {
    match parse_json_body::<Value>(data)? {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid(
            &["body"],
            "Input should be a valid dictionary",
            "dict_type",
        )),
    }
}

fn field_error(err: &serde_json::Error) -> FieldError {
    let message = err.to_string();

    match err.classify() {
        Category::Data => match missing_field(&message) {
            Some(field) => FieldError {
                loc: vec!["body".to_string(), field.to_string()],
                msg: "Field required".to_string(),
                kind: "missing".to_string(),
            },
            None => FieldError {
                loc: vec!["body".to_string()],
                msg: message,
                kind: "value_error".to_string(),
            },
        },
        Category::Syntax | Category::Eof | Category::Io => FieldError {
            loc: vec!["body".to_string()],
            msg: message,
            kind: "json_invalid".to_string(),
        },
    }
}

/// Field name out of serde's "missing field `name`" message
fn missing_field(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}
