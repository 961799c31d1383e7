//! Application setup and server configuration.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    error_handling::HandleErrorLayer,
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use comment_insights::{ClassifierConfig, CommentSource, GeminiAI, YouTubeCommentSource, AI};
use gemini_client::GeminiClient;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use youtube_client::YouTubeClient;

use crate::config::Config;
use crate::server::error::handle_middleware_error;
use crate::server::routes::{analyze_handler, comments_handler, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CommentSource>,
    pub ai: Arc<dyn AI>,
    /// Each analysis builds its own throttle from this
    pub classifier: ClassifierConfig,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        source: Arc<dyn CommentSource>,
        ai: Arc<dyn AI>,
        classifier: ClassifierConfig,
    ) -> Self {
        Self {
            source,
            ai,
            classifier,
            started_at: Instant::now(),
        }
    }

    /// Wire the YouTube and Gemini clients from configuration.
    ///
    /// Missing keys are logged here and rejected per request by the clients.
    pub fn from_config(config: &Config) -> Self {
        if config.youtube_api_key.is_none() {
            tracing::warn!("YOUTUBE_API_KEY not set, comment requests will fail");
        }
        if config.gemini_api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, analysis requests will fail");
        }

        let youtube = YouTubeClient::new(config.youtube_api_key.clone().unwrap_or_default())
            .with_timeout(config.upstream_timeout);

        let mut gemini = GeminiClient::new(config.gemini_api_key.clone().unwrap_or_default())
            .with_timeout(config.upstream_timeout);
        if let Some(model) = &config.gemini_model {
            gemini = gemini.with_model(model.clone());
        }
        tracing::info!(model = %gemini.model(), "Gemini model configured");

        Self::new(
            Arc::new(YouTubeCommentSource::new(youtube)),
            Arc::new(GeminiAI::new(gemini)),
            config.classifier.clone(),
        )
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    // CORS configuration - allow any origin, the API is read-only
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/comments", post(comments_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        // Timeouts render as the usual JSON error body
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
