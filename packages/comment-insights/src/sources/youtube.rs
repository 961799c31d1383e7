//! YouTube Data API implementation of the CommentSource trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use comment_insights::{CommentIngestor, CommentOrder, YouTubeCommentSource};
//!
//! let source = YouTubeCommentSource::from_env()?;
//! let comments = CommentIngestor::new(source)
//!     .fetch(&video_id, CommentOrder::Time, 100)
//!     .await?;
//! ```

use async_trait::async_trait;
use youtube_client::{
    CommentThread, CommentThreadsRequest, ThreadOrder, YouTubeClient, YouTubeError,
};

use crate::error::{IngestError, IngestResult};
use crate::traits::source::{CommentPage, CommentSource, PageRequest};
use crate::types::comment::{CommentItem, CommentOrder};

/// Reads top-level comment threads through `commentThreads.list`.
#[derive(Clone)]
pub struct YouTubeCommentSource {
    client: YouTubeClient,
}

impl YouTubeCommentSource {
    pub fn new(client: YouTubeClient) -> Self {
        Self { client }
    }

    /// Create from environment variable `YOUTUBE_API_KEY`.
    pub fn from_env() -> IngestResult<Self> {
        YouTubeClient::from_env()
            .map(Self::new)
            .map_err(|e| IngestError::Config(e.to_string()))
    }

    pub fn client(&self) -> &YouTubeClient {
        &self.client
    }
}

#[async_trait]
impl CommentSource for YouTubeCommentSource {
    async fn fetch_page(&self, request: &PageRequest) -> IngestResult<CommentPage> {
        let api_request = CommentThreadsRequest {
            video_id: request.video_id.clone(),
            order: match request.order {
                CommentOrder::Relevance => ThreadOrder::Relevance,
                CommentOrder::Time => ThreadOrder::Time,
            },
            max_results: request.page_size,
            page_token: request.page_token.clone(),
        };

        let response = self
            .client
            .list_comment_threads(&api_request)
            .await
            .map_err(|e| map_error(e, &request.video_id))?;

        Ok(CommentPage {
            items: response.items.into_iter().map(normalize_thread).collect(),
            next_page_token: response.next_page_token,
        })
    }
}

/// Flatten a thread into a comment item. The thread id is the comment id.
fn normalize_thread(thread: CommentThread) -> CommentItem {
    let snippet = thread.snippet.top_level_comment.snippet;
    CommentItem {
        id: thread.id,
        author: snippet.author_display_name,
        text: snippet.text_display,
        like_count: snippet.like_count,
        published_at: snippet.published_at,
    }
}

fn map_error(error: YouTubeError, video_id: &str) -> IngestError {
    match error {
        YouTubeError::Config(msg) => IngestError::Config(msg),
        YouTubeError::Network(msg) => IngestError::Network(msg),
        YouTubeError::QuotaExceeded(msg) => IngestError::QuotaExceeded(msg),
        YouTubeError::CommentsDisabled => IngestError::CommentsDisabled,
        YouTubeError::VideoNotFound => IngestError::VideoNotFound {
            video_id: video_id.to_string(),
        },
        YouTubeError::InvalidRequest(msg) => IngestError::InvalidRequest(msg),
        YouTubeError::Forbidden(msg) => IngestError::Forbidden(msg),
        YouTubeError::Api { status, message } => IngestError::Upstream { status, message },
        YouTubeError::Parse(msg) => IngestError::Parse(msg),
    }
}
