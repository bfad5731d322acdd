use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use super::traits::{Analyzer, TaskError, TaskKind};
use super::validation::{reject_sentinel, require_non_blank, truncate_chars, validate_http_url};
use crate::api::models::{AnalysisRequest, AnalysisResponse};
use crate::clients::{ContentAnalyzer, PageFetcher};

/// Page text handed to the language model is capped at this many characters
pub const MAX_CONTENT_CHARS: usize = 30_000;

const TASK: TaskKind = TaskKind::WebsiteAnalysis;

/// Fetches a page and asks the language model a question about it
#[derive(Clone)]
pub struct WebsiteAnalyzer {
    fetcher: Arc<dyn PageFetcher>,
    analyzer: Arc<dyn ContentAnalyzer>,
}

impl WebsiteAnalyzer {
    pub fn new(fetcher: Arc<dyn PageFetcher>, analyzer: Arc<dyn ContentAnalyzer>) -> Self {
        Self { fetcher, analyzer }
    }
}

#[async_trait]
impl Analyzer for WebsiteAnalyzer {
    type Request = AnalysisRequest;
    type Response = AnalysisResponse;

    fn kind(&self) -> TaskKind {
        TASK
    }

    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TaskError> {
        info!(url = %request.url, "Starting website analysis");

        // Both inputs are checked before anything leaves the process
        validate_http_url(TASK, &request.url)?;
        require_non_blank(TASK, &request.prompt, "Empty prompt provided")?;

        let content = self
            .fetcher
            .fetch(&request.url)
            .await
            .map_err(|e| TaskError::from_client(TASK, e))?;
        let content = reject_sentinel(TASK, content)?;
        debug!(chars = content.chars().count(), "Fetched website content");

        let excerpt = truncate_chars(&content, MAX_CONTENT_CHARS);
        let analysis = self
            .analyzer
            .analyze(excerpt, &request.prompt)
            .await
            .map_err(|e| TaskError::from_client(TASK, e))?;
        let analysis = reject_sentinel(TASK, analysis)?;

        if analysis.trim().is_empty() {
            return Err(TaskError::upstream(TASK, "Empty response from language model"));
        }

        info!(url = %request.url, "Analysis completed");
        Ok(AnalysisResponse::new(request.url, request.prompt, analysis))
    }
}
