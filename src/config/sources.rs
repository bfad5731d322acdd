use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "AGENTGATE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/agentgate.toml";
const ENV_PREFIX: &str = "AGENTGATE";
const ENV_SEPARATOR: &str = "__";
const LIST_SEPARATOR: &str = ",";

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const YOUTUBE_API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const DEEPAI_API_KEY_VAR: &str = "DEEPAI_API_KEY";

/// Path of the TOML file to load when none is given explicitly
pub fn default_path() -> PathBuf {
    env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load(config_path: PathBuf) -> Result<Config, ConfigError> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let mut config = load_from_sources(config_path)?;
    load_secrets(&mut config);

    Ok(config)
}

/// Provider API keys live only in the environment
fn load_secrets(config: &mut Config) {
    config.credentials.google_api_key = env::var(GOOGLE_API_KEY_VAR).ok();
    config.credentials.youtube_api_key = env::var(YOUTUBE_API_KEY_VAR).ok();
    config.credentials.deepai_api_key = env::var(DEEPAI_API_KEY_VAR).ok();
}

/// Load configuration from a specific path and environment overrides, without secrets
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    builder = builder.add_source(environment());

    let config = builder.build()?;
    config.try_deserialize()
}

/// AGENTGATE__SERVER__BIND_ADDR -> server.bind_addr
///
/// `AGENTGATE__SERVER__CORS_ORIGINS` takes a comma-separated list.
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .list_separator(LIST_SEPARATOR)
        .with_list_parse_key("server.cors_origins")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8000");
        assert_eq!(config.gemini.model, "gemini-pro");
        assert!(config.credentials.google_api_key.is_none());
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"
static_dir = "public"
max_body_bytes = 2048

[http]
request_timeout_secs = 15

[gemini]
model = "gemini-1.5-flash"
temperature = 0.2

[youtube]
max_results = 3
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.server.static_dir, PathBuf::from("public"));
        assert_eq!(config.server.max_body_bytes, 2048);
        assert_eq!(config.http.request_timeout_secs, 15);
        assert_eq!(config.http.connect_timeout_secs, 10);
        assert_eq!(config.gemini.model, "gemini-1.5-flash");
        assert!((config.gemini.temperature - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.youtube.max_results, 3);
        assert_eq!(config.deepai.base_url, "https://api.deepai.org");
    }

    #[test]
    fn test_secrets_are_not_read_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[credentials]
google_api_key = "from-file"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert!(config.credentials.google_api_key.is_none());
    }

    #[test]
    fn test_cors_origins_from_environment() {
        let vars = config::Map::from([
            (
                "AGENTGATE__SERVER__CORS_ORIGINS".to_string(),
                "http://a.test,http://b.test".to_string(),
            ),
            ("AGENTGATE__SERVER__MAX_BODY_BYTES".to_string(), "4096".to_string()),
        ]);

        let config: Config = config::Config::builder()
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.server.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.server.max_body_bytes, 4096);
    }
}
