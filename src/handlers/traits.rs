use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::clients::ClientError;

/// The three task types the gateway serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    WebsiteAnalysis,
    MusicSearch,
    ImageGeneration,
}

impl TaskKind {
    /// Wire tag carried in every response of this task
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::WebsiteAnalysis => "website_analysis",
            TaskKind::MusicSearch => "music_search",
            TaskKind::ImageGeneration => "image_generation",
        }
    }

    /// Prefix of failure messages
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::WebsiteAnalysis => "Analysis",
            TaskKind::MusicSearch => "Music search",
            TaskKind::ImageGeneration => "Image generation",
        }
    }
}

/// Handler-level failure. The message is prefixed with the task label.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Bad, missing or out-of-range input, caught before any outbound call
    #[error("{} failed: {message}", .task.label())]
    Validation { task: TaskKind, message: String },

    /// The service answered with an error, an empty payload or an unusable value
    #[error("{} failed: {message}", .task.label())]
    Upstream { task: TaskKind, message: String },

    /// Anything else raised while talking to a service
    #[error("{} failed due to unexpected error: {message}", .task.label())]
    Unexpected { task: TaskKind, message: String },
}

impl TaskError {
    pub fn validation(task: TaskKind, message: impl Into<String>) -> Self {
        TaskError::Validation {
            task,
            message: message.into(),
        }
    }

    pub fn upstream(task: TaskKind, message: impl Into<String>) -> Self {
        TaskError::Upstream {
            task,
            message: message.into(),
        }
    }

    pub fn unexpected(task: TaskKind, message: impl Into<String>) -> Self {
        TaskError::Unexpected {
            task,
            message: message.into(),
        }
    }

    /// Classify a leaf client failure for `task`
    pub fn from_client(task: TaskKind, err: ClientError) -> Self {
        if err.is_upstream() {
            TaskError::upstream(task, err.to_string())
        } else {
            TaskError::unexpected(task, err.to_string())
        }
    }

    pub fn task(&self) -> TaskKind {
        match self {
            TaskError::Validation { task, .. }
            | TaskError::Upstream { task, .. }
            | TaskError::Unexpected { task, .. } => *task,
        }
    }
}

/// A task handler: validate input, call the leaf client(s), normalize the result.
#[async_trait]
pub trait Analyzer: Send + Sync {
    type Request: Send + 'static;
    type Response: Send + 'static;

    fn kind(&self) -> TaskKind;

    async fn analyze(&self, request: Self::Request) -> Result<Self::Response, TaskError>;
}
