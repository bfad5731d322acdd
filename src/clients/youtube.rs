use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::debug;

use super::http::{ensure_success, request_error};
use super::{ClientError, RawVideo, VideoSearch};
use crate::config::YoutubeConfig;

const SERVICE: &str = "youtube";

/// Music video lookup through the YouTube Data API v3
pub struct YouTubeSearch {
    client: Client,
    api_key: String,
    base_url: String,
    max_results: usize,
    video_category_id: String,
}

impl YouTubeSearch {
    pub fn new(client: Client, api_key: String, config: &YoutubeConfig) -> Self {
        Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
            video_category_id: config.video_category_id.clone(),
        }
    }
}

impl fmt::Debug for YouTubeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeSearch")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Value>,
}

#[async_trait]
impl VideoSearch for YouTubeSearch {
    async fn search(&self, query: &str) -> Result<Vec<RawVideo>, ClientError> {
        let max_results = self.max_results.to_string();
        let params = [
            ("part", "snippet"),
            ("q", query),
            ("key", self.api_key.as_str()),
            ("maxResults", max_results.as_str()),
            ("type", "video"),
            ("videoCategoryId", self.video_category_id.as_str()),
            ("videoEmbeddable", "true"),
        ];

        debug!(query, "Searching YouTube");

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&params)
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let payload: SearchResponse =
            response.json().await.map_err(|e| ClientError::InvalidResponse {
                service: SERVICE,
                message: format!("Failed to parse response: {}", e),
            })?;

        let videos: Vec<RawVideo> = payload
            .items
            .iter()
            .take(self.max_results)
            .map(to_raw_video)
            .collect();

        debug!(count = videos.len(), "YouTube search completed");
        Ok(videos)
    }
}

/// Flatten one search item into a record. Fields the API left out stay absent.
fn to_raw_video(item: &Value) -> RawVideo {
    let mut record = RawVideo::new();
    let snippet = &item["snippet"];

    if let Some(video_id) = item["id"]["videoId"].as_str() {
        insert(
            &mut record,
            "video_url",
            Some(format!("https://www.youtube.com/watch?v={}", video_id)),
        );
        insert(
            &mut record,
            "embed_url",
            Some(format!("https://www.youtube.com/embed/{}", video_id)),
        );
    }

    insert(&mut record, "title", snippet["title"].as_str().map(str::to_owned));
    insert(
        &mut record,
        "thumbnail",
        snippet["thumbnails"]["high"]["url"]
            .as_str()
            .map(str::to_owned),
    );
    insert(
        &mut record,
        "channel",
        snippet["channelTitle"].as_str().map(str::to_owned),
    );
    insert(
        &mut record,
        "description",
        snippet["description"].as_str().map(str::to_owned),
    );

    record
}

fn insert(record: &mut RawVideo, key: &str, value: Option<String>) {
    if let Some(value) = value {
        record.insert(key.to_string(), Value::String(value));
    }
}
