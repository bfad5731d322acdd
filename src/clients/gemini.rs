use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::http::{ensure_success, request_error};
use super::{ClientError, ContentAnalyzer};
use crate::config::GeminiConfig;

const SERVICE: &str = "gemini";

/// Question answering over page text with a Gemini model
pub struct GeminiAnalyzer {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl GeminiAnalyzer {
    pub fn new(client: Client, api_key: String, config: &GeminiConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl fmt::Debug for GeminiAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiAnalyzer")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Prompt sent to the model: page text first, then the user's question
pub fn build_prompt(content: &str, question: &str) -> String {
    format!(
        "Here is the text content from a website:\n---\n{content}\n---\n\n\
         Based on this content, please answer the following question:\n{question}"
    )
}

#[async_trait]
impl ContentAnalyzer for GeminiAnalyzer {
    async fn analyze(&self, content: &str, prompt: &str) -> Result<String, ClientError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: build_prompt(content, prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        debug!(model = %self.model, "Sending request to Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let payload: GenerateContentResponse =
            response.json().await.map_err(|e| ClientError::InvalidResponse {
                service: SERVICE,
                message: format!("Failed to parse response: {}", e),
            })?;

        if let Some(reason) = payload
            .prompt_feedback
            .as_ref()
            .and_then(|feedback| feedback.block_reason.as_deref())
        {
            return Err(ClientError::Api {
                service: SERVICE,
                message: format!("prompt blocked: {}", reason),
            });
        }

        let text = payload.text();
        if text.trim().is_empty() {
            return Err(ClientError::InvalidResponse {
                service: SERVICE,
                message: "Empty response from Gemini".to_string(),
            });
        }

        debug!(chars = text.chars().count(), "Received response from Gemini");
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_prompt_layout() {
        let prompt = build_prompt("page text", "What is this?");
        assert!(prompt.starts_with("Here is the text content from a website:\n---\npage text\n---"));
        assert!(prompt.ends_with("please answer the following question:\nWhat is this?"));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(payload.text(), "Hello, world");
    }

    #[test]
    fn test_response_text_without_candidates() {
        let payload: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(payload.text(), "");
    }

    #[test]
    fn test_request_uses_camel_case() {
        let request = GenerateContentRequest {
            contents: vec![],
            generation_config: GenerationConfig { temperature: 0.5 },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = Client::new();
        let analyzer = GeminiAnalyzer::new(client, "secret-key".to_string(), &GeminiConfig::default());
        let printed = format!("{:?}", analyzer);
        assert!(!printed.contains("secret-key"));
    }
}
