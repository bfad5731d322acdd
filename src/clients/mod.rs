//! Leaf clients for the external services
//!
//! Each trait wraps exactly one external capability so handlers can be driven
//! by test doubles:
//!
//! - [`PageFetcher`] - fetch a web page and return its visible text
//! - [`ContentAnalyzer`] - answer a question about page text with a language model
//! - [`VideoSearch`] - look up music videos
//! - [`ImageApi`] - generate an image from a text prompt
//!
//! The concrete implementations share one `reqwest::Client` built from
//! [`HttpConfig`](crate::config::HttpConfig); see [`LeafClients::from_config`].

mod deepai;
mod fetcher;
mod gemini;
mod http;
mod youtube;

pub use deepai::DeepAiGenerator;
pub use fetcher::{WebPageFetcher, extract_text};
pub use gemini::{GeminiAnalyzer, build_prompt};
pub use http::build_client;
pub use youtube::YouTubeSearch;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ApiKeys, Config};

/// Raw search record as produced by a [`VideoSearch`] implementation.
///
/// Keys follow the `MusicVideo` field names; a record may lack some of them.
pub type RawVideo = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("failed to build {service} client: {message}")]
    Build {
        service: &'static str,
        message: String,
    },

    #[error("{service} request failed: {message}")]
    Request {
        service: &'static str,
        message: String,
    },

    #[error("{service} request timed out")]
    Timeout { service: &'static str },

    #[error("{service} returned HTTP {status}: {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    #[error("{service} returned an error: {message}")]
    Api {
        service: &'static str,
        message: String,
    },

    #[error("{service} returned an invalid response: {message}")]
    InvalidResponse {
        service: &'static str,
        message: String,
    },
}

impl ClientError {
    /// True when the service answered, but with an error or an unusable payload
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ClientError::Status { .. } | ClientError::Api { .. } | ClientError::InvalidResponse { .. }
        )
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its visible text
    async fn fetch(&self, url: &str) -> Result<String, ClientError>;
}

#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Answer `prompt` using `content` as context
    async fn analyze(&self, content: &str, prompt: &str) -> Result<String, ClientError>;
}

#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Search for videos, in service order
    async fn search(&self, query: &str) -> Result<Vec<RawVideo>, ClientError>;
}

#[async_trait]
pub trait ImageApi: Send + Sync {
    /// Generate an image and return its hosted URL
    async fn generate(&self, prompt: &str) -> Result<String, ClientError>;
}

/// The four leaf clients a handler registry is built from
#[derive(Clone)]
pub struct LeafClients {
    pub fetcher: Arc<dyn PageFetcher>,
    pub analyzer: Arc<dyn ContentAnalyzer>,
    pub search: Arc<dyn VideoSearch>,
    pub images: Arc<dyn ImageApi>,
}

impl LeafClients {
    /// Build the production clients from configuration and validated keys
    pub fn from_config(config: &Config, keys: &ApiKeys) -> Result<Self, ClientError> {
        let client = build_client(&config.http)?;

        Ok(Self {
            fetcher: Arc::new(WebPageFetcher::new(client.clone())),
            analyzer: Arc::new(GeminiAnalyzer::new(
                client.clone(),
                keys.google.clone(),
                &config.gemini,
            )),
            search: Arc::new(YouTubeSearch::new(
                client.clone(),
                keys.youtube.clone(),
                &config.youtube,
            )),
            images: Arc::new(DeepAiGenerator::new(client, keys.deepai.clone(), &config.deepai)),
        })
    }
}
