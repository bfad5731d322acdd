//! Configuration management for agentgate
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use agentgate::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Server listening on: {}", config.server.bind_addr);
//! ```
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `AGENTGATE__<section>__<key>`
//!
//! Examples:
//! - `AGENTGATE__SERVER__BIND_ADDR=0.0.0.0:9000`
//! - `AGENTGATE__GEMINI__MODEL=gemini-1.5-flash`
//! - `AGENTGATE__HTTP__REQUEST_TIMEOUT_SECS=30`
//!
//! Provider credentials are read only from `GOOGLE_API_KEY`, `YOUTUBE_API_KEY`
//! and `DEEPAI_API_KEY`. Loading fails if any of them is missing.
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/agentgate.toml`.
//! This can be overridden using the `AGENTGATE_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{
    ApiKeys, Config, Credentials, DeepAiConfig, GeminiConfig, HttpConfig, ServerConfig,
    YoutubeConfig,
};
pub use sources::{DEEPAI_API_KEY_VAR, GOOGLE_API_KEY_VAR, YOUTUBE_API_KEY_VAR};
pub use validation::ValidationError;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file is malformed
    /// - A provider credential is missing from the environment
    /// - Validation fails (timeouts, base URLs, limits)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(sources::default_path())
    }

    /// Load configuration from a specific path, plus environment overrides and secrets
    pub fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load(path)?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Validated provider keys
    pub fn api_keys(&self) -> Result<ApiKeys, ConfigError> {
        Ok(self.credentials.require()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "0.0.0.0:8080"
static_dir = "static"
cors_origins = ["http://localhost:3000"]
max_body_bytes = 65536

[http]
connect_timeout_secs = 5
request_timeout_secs = 30
user_agent = "agentgate-test/1.0"

[gemini]
base_url = "http://127.0.0.1:9100"
model = "gemini-1.5-pro"
temperature = 1.0

[youtube]
base_url = "http://127.0.0.1:9101/youtube/v3"
max_results = 5
video_category_id = "10"

[deepai]
base_url = "http://127.0.0.1:9102"
model = "text2img"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let mut config = sources::load_from_sources(config_path).unwrap();
        config.credentials = Credentials {
            google_api_key: Some("g".to_string()),
            youtube_api_key: Some("y".to_string()),
            deepai_api_key: Some("d".to_string()),
        };

        validation::validate(&config).unwrap();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.http.user_agent, "agentgate-test/1.0");
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.youtube.base_url, "http://127.0.0.1:9101/youtube/v3");
        assert!(config.api_keys().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_file_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        fs::write(&config_path, "[youtube]\nmax_results = 25\n").unwrap();

        let mut config = sources::load_from_sources(config_path).unwrap();
        config.credentials = Credentials {
            google_api_key: Some("g".to_string()),
            youtube_api_key: Some("y".to_string()),
            deepai_api_key: Some("d".to_string()),
        };

        let result = validation::validate(&config);
        assert!(matches!(
            result,
            Err(ValidationError::InvalidMaxResults { value: 25 })
        ));
    }
}
