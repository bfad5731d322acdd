use std::any::Any;
use std::net::SocketAddr;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, warn};
use uuid::Uuid;

use super::{
    error::ApiError,
    services::{agent_task, analyze_website, generate_image, health, index, metrics, search_music},
    state::AppState,
};
use crate::clients::LeafClients;
use crate::config::Config;
use crate::handlers::HandlerRegistry;

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Build the full application router around `state`
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze_website))
        .route("/api/music/search", post(search_music))
        .route("/api/image/generate", post(generate_image))
        .route("/agent-task", post(agent_task))
        .route("/operators/metrics", get(metrics))
        .nest_service("/static", static_dir)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
            info_span!(
                "request",
                request_id = %Uuid::new_v4(),
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .layer(cors)
}

/// Serve until Ctrl+C or SIGTERM
pub async fn run(config: Config) -> Result<(), AnyError> {
    let keys = config.api_keys()?;
    let clients = LeafClients::from_config(&config, &keys)?;
    let registry = HandlerRegistry::new(clients);

    let address = config.server.bind_addr;
    let state = AppState::new(config, registry);
    let app = router(state);

    serve(address, app).await
}

async fn serve(address: SocketAddr, app: Router) -> Result<(), AnyError> {
    let listener = TcpListener::bind(address).await?;
    info!(%address, "agentgate listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) if value != "*" => Some(value),
            _ => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = err.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = err.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "request handler panicked".to_string()
    };

    error!(%message, "Request handler panicked");
    ApiError::Internal(message).into_response()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        let mut sigterm = signal(SignalKind::terminate())
            .expect("failed to install signal handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
