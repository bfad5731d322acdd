use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{error, info, warn};

use super::{
    error::ApiError,
    models::{
        AnalysisRequest, AnalysisResponse, HealthResponse, ImageGenerationRequest,
        ImageGenerationResponse, MusicSearchRequest, MusicSearchResponse, TaskResponse,
    },
    state::AppState,
    utils::{parse_content_type, parse_json_body, parse_json_object},
};
use crate::handlers::{Analyzer, TaskError, TaskKind, classify};

/// Entry-point document, relative to `server.static_dir`
pub const INDEX_FILE: &str = "index.html";

/// Health check endpoint (GET /health)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Website analysis endpoint (POST /api/analyze)
pub async fn analyze_website(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let data = read_json_body(&state, &headers, body).await?;
    let request: AnalysisRequest = parse_json_body(&data)?;

    let handler = state.registry.website();
    let result = handler.analyze(request).await;
    record(&state, handler.kind(), result).map(Json)
}

/// Music search endpoint (POST /api/music/search)
pub async fn search_music(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<MusicSearchResponse>, ApiError> {
    let data = read_json_body(&state, &headers, body).await?;
    let request: MusicSearchRequest = parse_json_body(&data)?;

    let handler = state.registry.music();
    let result = handler.analyze(request).await;
    record(&state, handler.kind(), result).map(Json)
}

/// Image generation endpoint (POST /api/image/generate)
pub async fn generate_image(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<ImageGenerationResponse>, ApiError> {
    let data = read_json_body(&state, &headers, body).await?;
    let request: ImageGenerationRequest = parse_json_body(&data)?;

    let handler = state.registry.image();
    let result = handler.analyze(request).await;
    record(&state, handler.kind(), result).map(Json)
}

/// Legacy free-form endpoint (POST /agent-task)
///
/// The payload is classified by [`classify`] and handed to the matching
/// handler; the response is exactly that handler's response. A payload that
/// matches no rule is rejected with 400.
pub async fn agent_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<TaskResponse>, ApiError> {
    let data = read_json_body(&state, &headers, body).await?;
    let payload = parse_json_object(&data)?;

    let route = match classify(&payload) {
        Ok(route) => route,
        Err(err) => {
            state.metrics.legacy_rejected();
            warn!(error = %err, "Rejected legacy agent task");
            return Err(err.into());
        }
    };

    let kind = route.kind();
    info!(task = kind.tag(), "Dispatching legacy agent task");
    state.metrics.legacy_dispatched(kind);

    let response = record(&state, kind, state.registry.execute(route).await)?;
    info!(task = response.kind().tag(), "Legacy agent task completed");
    Ok(Json(response))
}

/// Entry-point document (GET /)
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let path = state.config.server.static_dir.join(INDEX_FILE);

    match tokio::fs::read_to_string(&path).await {
        Ok(document) => Ok(Html(document)),
        Err(err) => {
            error!(path = %path.display(), error = %err, "Failed to read entry-point document");
            Err(ApiError::InterfaceUnavailable)
        }
    }
}

/// Counter snapshot (GET /operators/metrics)
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

fn record<T>(state: &AppState, kind: TaskKind, result: Result<T, TaskError>) -> Result<T, ApiError> {
    match result {
        Ok(response) => {
            state.metrics.task_succeeded(kind);
            Ok(response)
        }
        Err(err) => {
            let task = err.task();
            state.metrics.task_failed(task);
            error!(task = task.tag(), error = %err, "Task failed");
            Err(err.into())
        }
    }
}

/// Checks Content-Type and reads at most `server.max_body_bytes` of the body
///
/// A request without Content-Type is read as JSON.
async fn read_json_body(
    state: &AppState,
    headers: &HeaderMap,
    body: Body,
) -> Result<Vec<u8>, ApiError> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        let content_type = content_type.to_str().map_err(|_| {
            ApiError::invalid(
                &["header", "content-type"],
                "Content-Type header is not valid ASCII",
                "content_type",
            )
        })?;
        parse_content_type(content_type)?;
    }

    let limit = state.config.server.max_body_bytes;
    let collected = Limited::new(body, limit).collect().await.map_err(|err| {
        if err.downcast_ref::<LengthLimitError>().is_some() {
            ApiError::PayloadTooLarge(limit)
        } else {
            ApiError::Internal(err.to_string())
        }
    })?;

    Ok(collected.to_bytes().to_vec())
}
