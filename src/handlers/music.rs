use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::traits::{Analyzer, TaskError, TaskKind};
use super::validation::require_non_blank;
use crate::api::models::{MusicSearchRequest, MusicSearchResponse, MusicVideo};
use crate::clients::{RawVideo, VideoSearch};

/// Upper bound on returned records
pub const MAX_RESULTS: usize = 5;

const TASK: TaskKind = TaskKind::MusicSearch;

/// Looks up music videos for a free-text query
#[derive(Clone)]
pub struct MusicSearcher {
    search: Arc<dyn VideoSearch>,
}

impl MusicSearcher {
    pub fn new(search: Arc<dyn VideoSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Analyzer for MusicSearcher {
    type Request = MusicSearchRequest;
    type Response = MusicSearchResponse;

    fn kind(&self) -> TaskKind {
        TASK
    }

    async fn analyze(&self, request: MusicSearchRequest) -> Result<MusicSearchResponse, TaskError> {
        info!(query = %request.query, "Starting music search");

        require_non_blank(TASK, &request.query, "Empty search query provided")?;

        let records = self
            .search
            .search(&request.query)
            .await
            .map_err(|e| TaskError::from_client(TASK, e))?;

        if records.is_empty() {
            info!(query = %request.query, "No results found");
            return Ok(MusicSearchResponse::new(request.query, Vec::new()));
        }

        let received = records.len();
        let results: Vec<MusicVideo> = records
            .iter()
            .filter_map(|record| match music_video(record) {
                Ok(video) => Some(video),
                Err(field) => {
                    warn!(field, "Skipping malformed search result");
                    None
                }
            })
            .take(MAX_RESULTS)
            .collect();

        info!(received, kept = results.len(), "Music search completed");
        Ok(MusicSearchResponse::new(request.query, results))
    }
}

/// Build a complete record, or name the first missing field
fn music_video(record: &RawVideo) -> Result<MusicVideo, &'static str> {
    let field = |name: &'static str| -> Result<String, &'static str> {
        record
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(name)
    };

    Ok(MusicVideo {
        title: field("title")?,
        video_url: field("video_url")?,
        embed_url: field("embed_url")?,
        thumbnail: field("thumbnail")?,
        channel: field("channel")?,
        description: field("description")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ClientError;
    use crate::handlers::testing::{Stub, video};

    fn request(query: &str) -> MusicSearchRequest {
        MusicSearchRequest {
            query: query.to_string(),
        }
    }

    #[tokio::test]
    async fn test_search_preserves_order() {
        let stub = Arc::new(Stub::ok(vec![video("b"), video("a"), video("c")]));

        let response = MusicSearcher::new(stub.clone())
            .analyze(request("lofi beats"))
            .await
            .unwrap();

        assert_eq!(response.task, TaskKind::MusicSearch);
        assert_eq!(response.query, "lofi beats");
        assert!(response.error.is_none());
        let titles: Vec<_> = response.results.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Title b", "Title a", "Title c"]);
        assert_eq!(stub.last_input().as_deref(), Some("lofi beats"));
    }

    #[tokio::test]
    async fn test_empty_results_are_success() {
        let stub = Arc::new(Stub::ok(Vec::new()));

        let response = MusicSearcher::new(stub).analyze(request("nothing")).await.unwrap();

        assert!(response.results.is_empty());
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_record_missing_channel_is_skipped() {
        let mut broken = video("broken");
        broken.remove("channel");
        let stub = Arc::new(Stub::ok(vec![video("first"), broken, video("last")]));

        let response = MusicSearcher::new(stub).analyze(request("song")).await.unwrap();

        let titles: Vec<_> = response.results.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Title first", "Title last"]);
    }

    #[tokio::test]
    async fn test_non_string_field_is_skipped() {
        let mut broken = video("broken");
        broken.insert("title".to_string(), Value::Null);
        let stub = Arc::new(Stub::ok(vec![broken]));

        let response = MusicSearcher::new(stub).analyze(request("song")).await.unwrap();
        assert!(response.results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_call() {
        let stub = Arc::new(Stub::ok(vec![video("a")]));

        let err = MusicSearcher::new(stub.clone()).analyze(request("  ")).await.unwrap_err();

        assert!(matches!(err, TaskError::Validation { .. }));
        assert_eq!(err.to_string(), "Music search failed: Empty search query provided");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_failure_fails_request() {
        let stub = Arc::new(Stub::<Vec<RawVideo>>::err(ClientError::Status {
            service: "youtube",
            status: 403,
            message: "quotaExceeded".to_string(),
        }));

        let err = MusicSearcher::new(stub).analyze(request("song")).await.unwrap_err();

        assert!(matches!(err, TaskError::Upstream { .. }));
        assert!(err.to_string().contains("quotaExceeded"));
    }

    #[test]
    fn test_music_video_names_missing_field() {
        let mut record = video("x");
        record.remove("thumbnail");
        assert_eq!(music_video(&record).unwrap_err(), "thumbnail");
    }
}
