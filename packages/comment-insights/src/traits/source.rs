//! CommentSource trait for paginated comment listing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::IngestResult;
use crate::types::comment::{CommentItem, CommentOrder};

/// Parameters for a single page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub video_id: String,
    pub order: CommentOrder,
    /// 1..=100.
    pub page_size: u32,
    /// Continuation token from the previous page; `None` for the first page.
    pub page_token: Option<String>,
}

/// One page of normalized comments.
#[derive(Debug, Clone, Default)]
pub struct CommentPage {
    pub items: Vec<CommentItem>,
    /// Absent on the final page.
    pub next_page_token: Option<String>,
}

impl CommentPage {
    pub fn new(items: Vec<CommentItem>) -> Self {
        Self {
            items,
            next_page_token: None,
        }
    }

    pub fn with_next_page_token(mut self, token: impl Into<String>) -> Self {
        self.next_page_token = Some(token.into());
        self
    }
}

/// A paginated comment-listing service.
///
/// Implementations fetch exactly one page per call and map upstream failures
/// onto [`crate::error::IngestError`].
#[async_trait]
pub trait CommentSource: Send + Sync {
    async fn fetch_page(&self, request: &PageRequest) -> IngestResult<CommentPage>;
}

#[async_trait]
impl<T: CommentSource + ?Sized> CommentSource for Arc<T> {
    async fn fetch_page(&self, request: &PageRequest) -> IngestResult<CommentPage> {
        (**self).fetch_page(request).await
    }
}
