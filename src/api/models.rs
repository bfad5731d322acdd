//! Request and response records for the agentgate HTTP API.
//!
//! Every response carries a fixed `task` tag so callers can tell the shapes apart
//! without looking at other fields:
//!
//! ```json
//! {
//!   "task": "music_search",
//!   "query": "lofi beats",
//!   "results": [
//!     {
//!       "title": "lofi hip hop radio",
//!       "video_url": "https://www.youtube.com/watch?v=jfKfPfyJRdk",
//!       "embed_url": "https://www.youtube.com/embed/jfKfPfyJRdk",
//!       "thumbnail": "https://i.ytimg.com/vi/jfKfPfyJRdk/hqdefault.jpg",
//!       "channel": "Lofi Girl",
//!       "description": "beats to relax/study to"
//!     }
//!   ],
//!   "error": null
//! }
//! ```
//!
//! Responses are built through their `new` constructors, which set the tag.

use serde::{Deserialize, Serialize};

use crate::handlers::TaskKind;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub task: TaskKind,
    pub source_url: String,
    pub user_prompt: String,
    pub analysis_result: String,
}

impl AnalysisResponse {
    pub fn new(source_url: String, user_prompt: String, analysis_result: String) -> Self {
        Self {
            task: TaskKind::WebsiteAnalysis,
            source_url,
            user_prompt,
            analysis_result,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MusicSearchRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicVideo {
    pub title: String,
    pub video_url: String,
    pub embed_url: String,
    pub thumbnail: String,
    pub channel: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicSearchResponse {
    pub task: TaskKind,
    pub query: String,
    pub results: Vec<MusicVideo>,
    pub error: Option<String>,
}

impl MusicSearchResponse {
    pub fn new(query: String, results: Vec<MusicVideo>) -> Self {
        Self {
            task: TaskKind::MusicSearch,
            query,
            results,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageGenerationRequest {
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageGenerationResponse {
    pub task: TaskKind,
    pub prompt: String,
    pub image_url: String,
    pub error: Option<String>,
}

impl ImageGenerationResponse {
    pub fn new(prompt: String, image_url: String) -> Self {
        Self {
            task: TaskKind::ImageGeneration,
            prompt,
            image_url,
            error: None,
        }
    }
}

/// Result of a legacy `/agent-task` call; serializes as the chosen task's response
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TaskResponse {
    WebsiteAnalysis(AnalysisResponse),
    MusicSearch(MusicSearchResponse),
    ImageGeneration(ImageGenerationResponse),
}

impl TaskResponse {
    pub fn kind(&self) -> TaskKind {
        match self {
            TaskResponse::WebsiteAnalysis(_) => TaskKind::WebsiteAnalysis,
            TaskResponse::MusicSearch(_) => TaskKind::MusicSearch,
            TaskResponse::ImageGeneration(_) => TaskKind::ImageGeneration,
        }
    }
}

/// One entry of the `errors` list on a 422 response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
