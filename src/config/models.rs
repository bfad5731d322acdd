use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;

use super::validation::ValidationError;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub youtube: YoutubeConfig,
    #[serde(default)]
    pub deepai: DeepAiConfig,
    /// Provider credentials (loaded from environment, never from the config file)
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Directory holding `index.html` and other static assets
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            static_dir: default_static_dir(),
            cors_origins: default_cors_origins(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("static")
}

fn default_cors_origins() -> Vec<String> {
    [
        "http://localhost",
        "http://localhost:8000",
        "http://127.0.0.1",
        "http://127.0.0.1:8000",
    ]
    .iter()
    .map(|origin| origin.to_string())
    .collect()
}

fn default_max_body_bytes() -> usize {
    1024 * 1024 // 1 MB
}

/// Outbound HTTP settings shared by every leaf client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36"
        .to_string()
}

/// Gemini language model settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeminiConfig {
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,
    #[serde(default = "default_gemini_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: default_gemini_base_url(),
            model: default_gemini_model(),
            temperature: default_temperature(),
        }
    }
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_gemini_model() -> String {
    "gemini-pro".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

/// YouTube Data API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct YoutubeConfig {
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Category filter, "10" is Music
    #[serde(default = "default_video_category_id")]
    pub video_category_id: String,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            base_url: default_youtube_base_url(),
            max_results: default_max_results(),
            video_category_id: default_video_category_id(),
        }
    }
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com/youtube/v3".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_video_category_id() -> String {
    "10".to_string()
}

/// DeepAI image generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeepAiConfig {
    #[serde(default = "default_deepai_base_url")]
    pub base_url: String,
    #[serde(default = "default_deepai_model")]
    pub model: String,
}

impl Default for DeepAiConfig {
    fn default() -> Self {
        Self {
            base_url: default_deepai_base_url(),
            model: default_deepai_model(),
        }
    }
}

fn default_deepai_base_url() -> String {
    "https://api.deepai.org".to_string()
}

fn default_deepai_model() -> String {
    "text2img".to_string()
}

/// Raw provider credentials as found in the environment
#[derive(Clone, Default)]
pub struct Credentials {
    pub google_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub deepai_api_key: Option<String>,
}

/// Credentials after presence checks, ready to hand to the leaf clients
#[derive(Clone)]
pub struct ApiKeys {
    pub google: String,
    pub youtube: String,
    pub deepai: String,
}

impl Credentials {
    /// Returns every key, or an error naming all the missing variables at once
    pub fn require(&self) -> Result<ApiKeys, ValidationError> {
        let entries = [
            (super::sources::GOOGLE_API_KEY_VAR, &self.google_api_key),
            (super::sources::YOUTUBE_API_KEY_VAR, &self.youtube_api_key),
            (super::sources::DEEPAI_API_KEY_VAR, &self.deepai_api_key),
        ];

        let missing: Vec<&str> = entries
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingCredentials {
                vars: missing.join(", "),
            });
        }

        Ok(ApiKeys {
            google: self.google_api_key.clone().unwrap_or_default(),
            youtube: self.youtube_api_key.clone().unwrap_or_default(),
            deepai: self.deepai_api_key.clone().unwrap_or_default(),
        })
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "[REDACTED]" } else { "<unset>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("google_api_key", &redact(&self.google_api_key))
            .field("youtube_api_key", &redact(&self.youtube_api_key))
            .field("deepai_api_key", &redact(&self.deepai_api_key))
            .finish()
    }
}

impl fmt::Debug for ApiKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
        assert_eq!(config.server.cors_origins.len(), 4);
        assert_eq!(config.http.request_timeout_secs, 60);
        assert_eq!(config.youtube.max_results, 5);
        assert_eq!(config.youtube.video_category_id, "10");
        assert_eq!(config.deepai.model, "text2img");
    }

    #[test]
    fn test_require_reports_every_missing_key() {
        let credentials = Credentials {
            google_api_key: Some("g".to_string()),
            youtube_api_key: None,
            deepai_api_key: Some("   ".to_string()),
        };

        match credentials.require() {
            Err(ValidationError::MissingCredentials { vars }) => {
                assert_eq!(vars, "YOUTUBE_API_KEY, DEEPAI_API_KEY");
            }
            other => panic!("Expected MissingCredentials, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_require_returns_keys() {
        let credentials = Credentials {
            google_api_key: Some("g".to_string()),
            youtube_api_key: Some("y".to_string()),
            deepai_api_key: Some("d".to_string()),
        };

        let keys = credentials.require().unwrap();
        assert_eq!(keys.google, "g");
        assert_eq!(keys.youtube, "y");
        assert_eq!(keys.deepai, "d");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials = Credentials {
            google_api_key: Some("super-secret".to_string()),
            ..Default::default()
        };

        let printed = format!("{:?}", credentials);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("<unset>"));
    }
}
