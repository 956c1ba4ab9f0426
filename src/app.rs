//! HTTP surface: UI page, chat relay endpoint, health probe.

use crate::ai::{GeminiGenerateClient, GenerationService};
use crate::models::{ChatRequest, ChatResponse, Config, ErrorResponse};
use crate::{prompt, templates, Error, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn, Instrument};
use uuid::Uuid;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<dyn GenerationService>,
    index_page: Arc<str>,
}

/// Owns the generation backend and builds the router around it.
pub struct App {
    state: AppState,
    max_body_bytes: usize,
}

impl App {
    /// Build an app around any generation backend.
    ///
    /// Integration tests use this to inject `MockGenerationClient`.
    pub fn with_service(generator: Arc<dyn GenerationService>, max_body_bytes: usize) -> Self {
        let index_page = templates::render_index(generator.model()).into();
        Self {
            state: AppState {
                generator,
                index_page,
            },
            max_body_bytes,
        }
    }

    /// Construct the Gemini-backed app. One HTTP connection pool is shared
    /// by every request.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Connection(format!("Failed to build HTTP client: {}", e)))?;

        let generator = GeminiGenerateClient::new_with_client(
            config.gemini_api_key.clone(),
            config.gemini_model.clone(),
            config.upstream_timeout,
            http_client,
        )
        .with_base_url(config.gemini_base_url.clone());

        info!(
            "Generation provider: Gemini (model: {}, timeout: {:?})",
            generator.model(),
            config.upstream_timeout
        );

        Ok(Self::with_service(
            Arc::new(generator),
            config.max_body_bytes,
        ))
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/chat", post(chat))
            .route("/health", get(health_check))
            .with_state(self.state.clone())
            .layer(DefaultBodyLimit::max(self.max_body_bytes))
            .layer(TraceLayer::new_for_http())
    }
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(state.index_page.to_string())
}

/// Dropping this future (client disconnect) aborts the upstream call.
async fn chat(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<Json<ChatResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("chat", %request_id);

    async move {
        let body = body.map_err(|e| {
            warn!("Rejected chat body: {}", e);
            Error::BadRequest(e.body_text())
        })?;

        // A bare `null` body is an empty request, not a malformed one.
        let request: ChatRequest = serde_json::from_slice::<Option<ChatRequest>>(&body)
            .map_err(|e| {
                warn!("Malformed chat request: {}", e);
                Error::BadRequest(e.to_string())
            })?
            .unwrap_or_default();

        let response = prompt::relay(state.generator.as_ref(), &request).await?;
        Ok::<_, Error>(Json(ChatResponse { response }))
    }
    .instrument(span)
    .await
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::BadRequest(_) => (StatusCode::BAD_REQUEST, "Invalid Request".to_string()),
            Error::Connection(_) | Error::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Connection Error".to_string(),
            ),
            Error::Generation(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("AI Error: {}", detail),
            ),
            Error::Http(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("AI Error: {}", e),
            ),
        };

        if status.is_server_error() {
            error!("Chat request failed: {}", self);
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MockGenerationClient;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_maps_to_400() {
        let response = Error::BadRequest("eof".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Invalid Request" })
        );
    }

    #[tokio::test]
    async fn test_connection_error_maps_to_500() {
        let response = Error::Connection("no key".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Connection Error" })
        );
    }

    #[tokio::test]
    async fn test_generation_error_embeds_detail() {
        let response = Error::Generation("quota exceeded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "AI Error: quota exceeded" })
        );
    }

    #[test]
    fn test_index_page_shows_model() {
        let app = App::with_service(Arc::new(MockGenerationClient::new()), 1024);
        assert!(app.state.index_page.contains("mock-model"));
    }
}
