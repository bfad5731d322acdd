use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

use super::http::{ensure_success, request_error};
use super::{ClientError, ImageApi};
use crate::config::DeepAiConfig;

const SERVICE: &str = "deepai";

/// Text-to-image generation through the DeepAI standard API
pub struct DeepAiGenerator {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl DeepAiGenerator {
    pub fn new(client: Client, api_key: String, config: &DeepAiConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }
}

impl fmt::Debug for DeepAiGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepAiGenerator")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    output_url: Option<String>,
    err: Option<String>,
}

#[async_trait]
impl ImageApi for DeepAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        debug!(model = %self.model, "Requesting image from DeepAI");

        let response = self
            .client
            .post(format!("{}/api/{}", self.base_url, self.model))
            .header("api-key", &self.api_key)
            .form(&[("text", prompt)])
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let payload: GenerateResponse =
            response.json().await.map_err(|e| ClientError::InvalidResponse {
                service: SERVICE,
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(err) = payload.err {
            return Err(ClientError::Api {
                service: SERVICE,
                message: err,
            });
        }

        payload.output_url.ok_or(ClientError::InvalidResponse {
            service: SERVICE,
            message: "No image URL returned".to_string(),
        })
    }
}
