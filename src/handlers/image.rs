use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use super::traits::{Analyzer, TaskError, TaskKind};
use super::validation::{is_http_url, reject_sentinel, require_non_blank};
use crate::api::models::{ImageGenerationRequest, ImageGenerationResponse};
use crate::clients::ImageApi;

/// Longest accepted prompt, counted in characters
pub const MAX_PROMPT_CHARS: usize = 1000;

const TASK: TaskKind = TaskKind::ImageGeneration;

/// Turns a text prompt into a hosted image URL
#[derive(Clone)]
pub struct ImageGenerator {
    api: Arc<dyn ImageApi>,
}

impl ImageGenerator {
    pub fn new(api: Arc<dyn ImageApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Analyzer for ImageGenerator {
    type Request = ImageGenerationRequest;
    type Response = ImageGenerationResponse;

    fn kind(&self) -> TaskKind {
        TASK
    }

    async fn analyze(
        &self,
        request: ImageGenerationRequest,
    ) -> Result<ImageGenerationResponse, TaskError> {
        let prompt_chars = request.prompt.chars().count();
        info!(prompt_chars, "Starting image generation");

        require_non_blank(TASK, &request.prompt, "Empty prompt provided")?;
        if prompt_chars > MAX_PROMPT_CHARS {
            return Err(TaskError::validation(
                TASK,
                format!("Prompt too long. Maximum length is {MAX_PROMPT_CHARS} characters"),
            ));
        }

        let image_url = self
            .api
            .generate(&request.prompt)
            .await
            .map_err(|e| TaskError::from_client(TASK, e))?;

        if image_url.is_empty() {
            return Err(TaskError::upstream(TASK, "No image URL returned"));
        }
        let image_url = reject_sentinel(TASK, image_url)?;
        if !is_http_url(&image_url) {
            return Err(TaskError::upstream(TASK, "Invalid image URL returned"));
        }

        info!(image_url = %image_url, "Image generated");
        Ok(ImageGenerationResponse::new(request.prompt, image_url))
    }
}
