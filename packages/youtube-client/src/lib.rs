//! Pure YouTube Data API v3 client.
//!
//! A minimal client for the `commentThreads.list` endpoint. Fetches exactly one
//! page per call; following continuation tokens is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use youtube_client::{CommentThreadsRequest, ThreadOrder, YouTubeClient};
//!
//! let client = YouTubeClient::from_env()?;
//!
//! let page = client
//!     .list_comment_threads(&CommentThreadsRequest {
//!         video_id: "dQw4w9WgXcQ".into(),
//!         order: ThreadOrder::Relevance,
//!         max_results: 100,
//!         page_token: None,
//!     })
//!     .await?;
//! println!("{} threads, next = {:?}", page.items.len(), page.next_page_token);
//! ```

pub mod error;
pub mod types;

pub use error::{Result, YouTubeError};
pub use types::{
    CommentSnippet, CommentThread, CommentThreadListResponse, CommentThreadsRequest, PageInfo,
    ThreadOrder,
};

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use types::ApiErrorResponse;

const BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: Arc<SecretString>,
    base_url: String,
    timeout: Duration,
}

impl YouTubeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: Arc::new(SecretString::new(api_key.into().into_boxed_str())),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variable `YOUTUBE_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| YouTubeError::Config("YOUTUBE_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-request timeout. Expiry surfaces as [`YouTubeError::Network`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one page of top-level comment threads for a video.
    pub async fn list_comment_threads(
        &self,
        request: &CommentThreadsRequest,
    ) -> Result<CommentThreadListResponse> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(YouTubeError::Config("YOUTUBE_API_KEY not set".into()));
        }

        let max_results = request.max_results.to_string();
        let mut query: Vec<(&str, &str)> = vec![
            ("key", self.api_key.expose_secret()),
            ("part", "snippet"),
            ("videoId", request.video_id.as_str()),
            ("maxResults", max_results.as_str()),
            ("order", request.order.as_str()),
        ];
        if let Some(token) = request.page_token.as_deref() {
            query.push(("pageToken", token));
        }

        let start = std::time::Instant::now();
        let resp = self
            .client
            .get(format!("{}/commentThreads", self.base_url))
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                // The request URL carries the key.
                let e = e.without_url();
                tracing::warn!(error = %e, video_id = %request.video_id, "YouTube request failed");
                YouTubeError::Network(e.to_string())
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let error = classify_error(status.as_u16(), &body);
            tracing::warn!(status = %status, error = %error, "YouTube API error");
            return Err(error);
        }

        let page: CommentThreadListResponse = resp.json().await?;

        tracing::debug!(
            video_id = %request.video_id,
            items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            duration_ms = start.elapsed().as_millis(),
            "YouTube commentThreads page"
        );

        Ok(page)
    }
}

/// Map a non-2xx response onto a typed error.
fn classify_error(status: u16, body: &str) -> YouTubeError {
    let parsed = serde_json::from_str::<ApiErrorResponse>(body).ok();
    let reason = parsed
        .as_ref()
        .and_then(|p| p.error.errors.first())
        .map(|d| d.reason.as_str())
        .unwrap_or_default();
    let message = parsed
        .as_ref()
        .map(|p| p.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    match (status, reason) {
        (_, "quotaExceeded" | "dailyLimitExceeded" | "rateLimitExceeded") => {
            YouTubeError::QuotaExceeded(message)
        }
        (_, "commentsDisabled") => YouTubeError::CommentsDisabled,
        (404, _) | (_, "videoNotFound") => YouTubeError::VideoNotFound,
        (400, _) => YouTubeError::InvalidRequest(message),
        (403, _) => YouTubeError::Forbidden(message),
        _ => YouTubeError::Api { status, message },
    }
}
