use super::models::Config;
use axum::http::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required environment variables: {vars}")]
    MissingCredentials { vars: String },

    #[error("Timeout must be positive: {field} = 0")]
    InvalidTimeout { field: String },

    #[error("youtube.max_results must be between 1 and 5, got {value}")]
    InvalidMaxResults { value: usize },

    #[error("gemini.temperature must be between 0.0 and 2.0, got {value}")]
    InvalidTemperature { value: f32 },

    #[error("Invalid base URL for {service}: '{url}' (expected http:// or https://)")]
    InvalidBaseUrl { service: String, url: String },

    #[error("Invalid CORS origin '{origin}'")]
    InvalidCorsOrigin { origin: String },

    #[error("server.max_body_bytes must be positive")]
    InvalidBodyLimit,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    config.credentials.require()?;
    validate_server(config)?;
    validate_http(config)?;
    validate_providers(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_body_bytes == 0 {
        return Err(ValidationError::InvalidBodyLimit);
    }

    // Credentialed CORS cannot use a wildcard origin
    for origin in &config.server.cors_origins {
        if origin == "*" || HeaderValue::from_str(origin).is_err() {
            return Err(ValidationError::InvalidCorsOrigin {
                origin: origin.clone(),
            });
        }
    }

    Ok(())
}

/// Every outbound call is bounded; zero would mean an immediate failure
fn validate_http(config: &Config) -> Result<(), ValidationError> {
    let timeouts = [
        ("http.connect_timeout_secs", config.http.connect_timeout_secs),
        ("http.request_timeout_secs", config.http.request_timeout_secs),
    ];

    for (field, value) in timeouts {
        if value == 0 {
            return Err(ValidationError::InvalidTimeout {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

fn validate_providers(config: &Config) -> Result<(), ValidationError> {
    let base_urls = [
        ("gemini", &config.gemini.base_url),
        ("youtube", &config.youtube.base_url),
        ("deepai", &config.deepai.base_url),
    ];

    for (service, url) in base_urls {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl {
                service: service.to_string(),
                url: url.clone(),
            });
        }
    }

    if !(1..=5).contains(&config.youtube.max_results) {
        return Err(ValidationError::InvalidMaxResults {
            value: config.youtube.max_results,
        });
    }

    if !(0.0..=2.0).contains(&config.gemini.temperature) {
        return Err(ValidationError::InvalidTemperature {
            value: config.gemini.temperature,
        });
    }

    Ok(())
}
