//! Classification of free-form `/agent-task` payloads.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! 1. a non-empty string `url` routes to website analysis
//! 2. a string `prompt` containing a music keyword routes to music search,
//!    with the prompt as the query
//! 3. a string `prompt` containing an image keyword routes to image generation
//!
//! Keywords are matched as substrings of the lowercased prompt.

use serde_json::{Map, Value};
use thiserror::Error;

use super::traits::TaskKind;
use crate::api::models::{AnalysisRequest, ImageGenerationRequest, MusicSearchRequest};

pub const MUSIC_KEYWORDS: &[&str] = &["find music", "play music", "search song"];
pub const IMAGE_KEYWORDS: &[&str] = &["generate image", "create image"];

type Payload = Map<String, Value>;

struct Rule {
    kind: TaskKind,
    matches: fn(&Payload) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        kind: TaskKind::WebsiteAnalysis,
        matches: has_url,
    },
    Rule {
        kind: TaskKind::MusicSearch,
        matches: mentions_music,
    },
    Rule {
        kind: TaskKind::ImageGeneration,
        matches: mentions_image,
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error(
        "Please specify a valid request type (website analysis, music search, or image generation)"
    )]
    NoMatchingRoute,
}

/// A classified payload, ready for its handler
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    WebsiteAnalysis(AnalysisRequest),
    MusicSearch(MusicSearchRequest),
    ImageGeneration(ImageGenerationRequest),
}

impl Route {
    pub fn kind(&self) -> TaskKind {
        match self {
            Route::WebsiteAnalysis(_) => TaskKind::WebsiteAnalysis,
            Route::MusicSearch(_) => TaskKind::MusicSearch,
            Route::ImageGeneration(_) => TaskKind::ImageGeneration,
        }
    }
}

pub fn classify(payload: &Payload) -> Result<Route, DispatchError> {
    let kind = RULES
        .iter()
        .find(|rule| (rule.matches)(payload))
        .map(|rule| rule.kind)
        .ok_or(DispatchError::NoMatchingRoute)?;

    let prompt = string_field(payload, "prompt").unwrap_or_default().to_string();

    Ok(match kind {
        TaskKind::WebsiteAnalysis => Route::WebsiteAnalysis(AnalysisRequest {
            url: string_field(payload, "url").unwrap_or_default().to_string(),
            prompt,
        }),
        TaskKind::MusicSearch => Route::MusicSearch(MusicSearchRequest { query: prompt }),
        TaskKind::ImageGeneration => Route::ImageGeneration(ImageGenerationRequest { prompt }),
    })
}

fn string_field<'a>(payload: &'a Payload, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(Value::as_str)
}

fn has_url(payload: &Payload) -> bool {
    string_field(payload, "url").is_some_and(|url| !url.is_empty())
}

fn mentions_music(payload: &Payload) -> bool {
    prompt_mentions(payload, MUSIC_KEYWORDS)
}

fn mentions_image(payload: &Payload) -> bool {
    prompt_mentions(payload, IMAGE_KEYWORDS)
}

fn prompt_mentions(payload: &Payload, keywords: &[&str]) -> bool {
    string_field(payload, "prompt").is_some_and(|prompt| {
        let prompt = prompt.to_lowercase();
        keywords.iter().any(|keyword| prompt.contains(keyword))
    })
}
