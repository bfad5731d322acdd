use std::sync::Arc;

use super::dispatch::Route;
use super::image::ImageGenerator;
use super::music::MusicSearcher;
use super::traits::{Analyzer, TaskError};
use super::website::WebsiteAnalyzer;
use crate::api::models::TaskResponse;
use crate::clients::LeafClients;

/// The three task handlers, built once at startup and shared by every request
#[derive(Clone)]
pub struct HandlerRegistry {
    website: Arc<WebsiteAnalyzer>,
    music: Arc<MusicSearcher>,
    image: Arc<ImageGenerator>,
}

impl HandlerRegistry {
    pub fn new(clients: LeafClients) -> Self {
        Self {
            website: Arc::new(WebsiteAnalyzer::new(clients.fetcher, clients.analyzer)),
            music: Arc::new(MusicSearcher::new(clients.search)),
            image: Arc::new(ImageGenerator::new(clients.images)),
        }
    }

    pub fn website(&self) -> &WebsiteAnalyzer {
        &self.website
    }

    pub fn music(&self) -> &MusicSearcher {
        &self.music
    }

    pub fn image(&self) -> &ImageGenerator {
        &self.image
    }

    /// Run the handler a dispatcher route points at
    pub async fn execute(&self, route: Route) -> Result<TaskResponse, TaskError> {
        match route {
            Route::WebsiteAnalysis(request) => self
                .website
                .analyze(request)
                .await
                .map(TaskResponse::WebsiteAnalysis),
            Route::MusicSearch(request) => self
                .music
                .analyze(request)
                .await
                .map(TaskResponse::MusicSearch),
            Route::ImageGeneration(request) => self
                .image
                .analyze(request)
                .await
                .map(TaskResponse::ImageGeneration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AnalysisRequest, ImageGenerationRequest, MusicSearchRequest};
    use crate::handlers::TaskKind;
    use crate::handlers::testing::{Stub, video};

    fn registry() -> HandlerRegistry {
        HandlerRegistry::new(LeafClients {
            fetcher: Arc::new(Stub::ok("page text".to_string())),
            analyzer: Arc::new(Stub::ok("an answer".to_string())),
            search: Arc::new(Stub::ok(vec![video("a")])),
            images: Arc::new(Stub::ok("https://img.example/a.png".to_string())),
        })
    }

    #[tokio::test]
    async fn test_execute_routes_to_matching_handler() {
        let registry = registry();

        let routes = [
            Route::WebsiteAnalysis(AnalysisRequest {
                url: "https://example.com".to_string(),
                prompt: "what?".to_string(),
            }),
            Route::MusicSearch(MusicSearchRequest {
                query: "find music".to_string(),
            }),
            Route::ImageGeneration(ImageGenerationRequest {
                prompt: "create image".to_string(),
            }),
        ];

        for route in routes {
            let expected = route.kind();
            let response = registry.execute(route).await.unwrap();
            assert_eq!(response.kind(), expected);
        }
    }

    #[tokio::test]
    async fn test_execute_propagates_validation_failure() {
        let err = registry()
            .execute(Route::WebsiteAnalysis(AnalysisRequest {
                url: "https://example.com".to_string(),
                prompt: String::new(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.task(), TaskKind::WebsiteAnalysis);
        assert!(matches!(err, TaskError::Validation { .. }));
    }
}
