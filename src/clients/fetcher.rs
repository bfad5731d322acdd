use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use scraper::{ElementRef, Html, Node};
use tracing::debug;

use super::http::{ensure_success, request_error};
use super::{ClientError, PageFetcher};

const SERVICE: &str = "website";

/// Tags whose text never reaches the reader
const HIDDEN_TAGS: &[&str] = &["script", "style"];

/// Fetches pages over HTTP and reduces them to visible text
#[derive(Debug, Clone)]
pub struct WebPageFetcher {
    client: Client,
}

impl WebPageFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageFetcher for WebPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ClientError> {
        debug!(url, "Fetching page");

        let response = self
            .client
            .get(url)
            .header(
                ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            )
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| request_error(SERVICE, e))?;

        let response = ensure_success(SERVICE, response).await?;
        let html = response.text().await.map_err(|e| request_error(SERVICE, e))?;

        let text = extract_text(&html);
        debug!(url, html_bytes = html.len(), text_chars = text.chars().count(), "Page fetched");

        Ok(text)
    }
}

/// Visible text of an HTML document.
///
/// Text nodes are trimmed, empty ones dropped, and the rest joined with a single
/// space. Anything inside `<script>` or `<style>` is skipped.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();
    collect_text(document.root_element(), &mut parts);
    parts.join(" ")
}

fn collect_text<'a>(element: ElementRef<'a>, parts: &mut Vec<&'a str>) {
    if HIDDEN_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed);
                }
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    collect_text(child, parts);
                }
            }
            _ => {}
        }
    }
}
