//! Leaf client doubles for handler tests

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::clients::{
    ClientError, ContentAnalyzer, ImageApi, PageFetcher, RawVideo, VideoSearch,
};

/// Replays a fixed result and counts calls
pub struct Stub<T> {
    result: Result<T, ClientError>,
    calls: AtomicUsize,
    last_input: Mutex<Option<String>>,
}

impl<T: Clone> Stub<T> {
    pub fn ok(value: T) -> Self {
        Self::with(Ok(value))
    }

    pub fn err(err: ClientError) -> Self {
        Self::with(Err(err))
    }

    fn with(result: Result<T, ClientError>) -> Self {
        Self {
            result,
            calls: AtomicUsize::new(0),
            last_input: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_input(&self) -> Option<String> {
        self.last_input.lock().unwrap().clone()
    }

    fn respond(&self, input: &str) -> Result<T, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_input.lock().unwrap() = Some(input.to_string());

        self.result.clone()
    }
}

#[async_trait]
impl PageFetcher for Stub<String> {
    async fn fetch(&self, url: &str) -> Result<String, ClientError> {
        self.respond(url)
    }
}

#[async_trait]
impl ContentAnalyzer for Stub<String> {
    async fn analyze(&self, content: &str, _prompt: &str) -> Result<String, ClientError> {
        self.respond(content)
    }
}

#[async_trait]
impl VideoSearch for Stub<Vec<RawVideo>> {
    async fn search(&self, query: &str) -> Result<Vec<RawVideo>, ClientError> {
        self.respond(query)
    }
}

#[async_trait]
impl ImageApi for Stub<String> {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        self.respond(prompt)
    }
}

/// A complete search record
pub fn video(id: &str) -> RawVideo {
    let mut record = RawVideo::new();
    for (key, value) in [
        ("title", format!("Title {id}")),
        ("video_url", format!("https://www.youtube.com/watch?v={id}")),
        ("embed_url", format!("https://www.youtube.com/embed/{id}")),
        ("thumbnail", format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")),
        ("channel", format!("Channel {id}")),
        ("description", format!("Description {id}")),
    ] {
        record.insert(key.to_string(), value.into());
    }
    record
}
