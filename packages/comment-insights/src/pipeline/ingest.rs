//! Ingestion pipeline - page through a video's comments up to the cap.

use tracing::{debug, info, warn};

use crate::error::{IngestError, IngestResult};
use crate::traits::source::{CommentSource, PageRequest};
use crate::types::comment::{CommentItem, CommentOrder};
use crate::types::config::{MAX_COMMENTS, MAX_PAGE_SIZE};
use crate::video_id::VideoId;

/// Result of an ingest operation.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    /// Comments in upstream order, at most [`MAX_COMMENTS`].
    pub items: Vec<CommentItem>,

    /// Number of pages requested
    pub pages_fetched: usize,

    /// True when more comments existed beyond the cap
    pub truncated: bool,
}

/// Collects a video's top-level comments page by page.
///
/// Pages are requested strictly one after another because each request
/// needs the previous page's continuation token.
pub struct CommentIngestor<S: CommentSource> {
    source: S,
}

impl<S: CommentSource> CommentIngestor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch up to [`MAX_COMMENTS`] comments.
    ///
    /// Any page failure fails the whole call; partial results are discarded.
    pub async fn fetch(
        &self,
        video_id: &VideoId,
        order: CommentOrder,
        page_size: u32,
    ) -> IngestResult<Vec<CommentItem>> {
        Ok(self.fetch_with_outcome(video_id, order, page_size).await?.items)
    }

    /// Like [`fetch`](Self::fetch), also reporting pagination details.
    pub async fn fetch_with_outcome(
        &self,
        video_id: &VideoId,
        order: CommentOrder,
        page_size: u32,
    ) -> IngestResult<IngestOutcome> {
        if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
            return Err(IngestError::Validation {
                reason: format!("page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
            });
        }

        info!(video_id = %video_id, order = order.as_str(), page_size, "Fetching comments");

        let mut outcome = IngestOutcome::default();
        let mut page_token: Option<String> = None;

        loop {
            let request = PageRequest {
                video_id: video_id.to_string(),
                order,
                page_size,
                page_token: page_token.clone(),
            };

            let page = self.source.fetch_page(&request).await?;
            outcome.pages_fetched += 1;

            let received = page.items.len();
            let remaining = MAX_COMMENTS - outcome.items.len();
            if received > remaining {
                outcome.truncated = true;
            }
            outcome.items.extend(page.items.into_iter().take(remaining));

            debug!(
                page = outcome.pages_fetched,
                received,
                total = outcome.items.len(),
                "Fetched comment page"
            );

            let next = page.next_page_token.filter(|t| !t.is_empty());

            if outcome.items.len() >= MAX_COMMENTS {
                if next.is_some() {
                    outcome.truncated = true;
                }
                break;
            }

            match next {
                None => break,
                Some(token) if page_token.as_deref() == Some(token.as_str()) => {
                    warn!(
                        video_id = %video_id,
                        page = outcome.pages_fetched,
                        "Upstream repeated a continuation token, stopping pagination"
                    );
                    break;
                }
                Some(token) => page_token = Some(token),
            }
        }

        if outcome.truncated {
            warn!(
                video_id = %video_id,
                limit = MAX_COMMENTS,
                "Comment list truncated at limit"
            );
        }

        info!(
            video_id = %video_id,
            comments = outcome.items.len(),
            pages = outcome.pages_fetched,
            truncated = outcome.truncated,
            "Fetched comments"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_comments, MockCommentSource};

    fn video() -> VideoId {
        VideoId::parse("dQw4w9WgXcQ").unwrap()
    }

    #[tokio::test]
    async fn test_rejects_out_of_range_page_size() {
        let source = MockCommentSource::paged(fake_comments(5), 5);
        let ingestor = CommentIngestor::new(source.clone());

        for size in [0, 101] {
            let err = ingestor
                .fetch(&video(), CommentOrder::Time, size)
                .await
                .unwrap_err();
            assert!(matches!(err, IngestError::Validation { .. }));
        }
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_concatenates_pages_in_order() {
        let source = MockCommentSource::paged(fake_comments(25), 10);
        let ingestor = CommentIngestor::new(source.clone());

        let outcome = ingestor
            .fetch_with_outcome(&video(), CommentOrder::Relevance, 10)
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 25);
        assert_eq!(outcome.pages_fetched, 3);
        assert!(!outcome.truncated);
        assert_eq!(outcome.items[0].id, "comment-0");
        assert_eq!(outcome.items[24].id, "comment-24");

        let requests = source.requests();
        assert_eq!(requests[0].page_token, None);
        assert_eq!(requests[1].page_token.as_deref(), Some("page-1"));
        assert!(requests.iter().all(|r| r.order == CommentOrder::Relevance));
    }

    #[tokio::test]
    async fn test_exactly_at_cap_is_not_truncated() {
        let source = MockCommentSource::paged(fake_comments(1000), 100);
        let outcome = CommentIngestor::new(source)
            .fetch_with_outcome(&video(), CommentOrder::Time, 100)
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 1000);
        assert!(!outcome.truncated);
    }

    #[tokio::test]
    async fn test_cap_inside_a_page_truncates() {
        // 990 + 30: the eleventh page straddles the cap
        let source = MockCommentSource::paged(fake_comments(1020), 30);
        let outcome = CommentIngestor::new(source.clone())
            .fetch_with_outcome(&video(), CommentOrder::Time, 30)
            .await
            .unwrap();

        assert_eq!(outcome.items.len(), 1000);
        assert!(outcome.truncated);
        assert_eq!(source.requests().len(), 34);
    }

    #[tokio::test]
    async fn test_repeated_token_stops() {
        let source = MockCommentSource::new()
            .with_page(None, fake_comments(2), Some("loop"))
            .with_page(Some("loop"), fake_comments(2), Some("loop"));

        let outcome = CommentIngestor::new(source.clone())
            .fetch_with_outcome(&video(), CommentOrder::Time, 2)
            .await
            .unwrap();

        assert_eq!(outcome.pages_fetched, 2);
        assert_eq!(outcome.items.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_token_ends_pagination() {
        let source = MockCommentSource::new().with_page(None, fake_comments(3), Some(""));

        let items = CommentIngestor::new(source.clone())
            .fetch(&video(), CommentOrder::Time, 50)
            .await
            .unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(source.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_page_failure_discards_partial_results() {
        let source = MockCommentSource::paged(fake_comments(30), 10)
            .failing_on(Some("page-2"), || IngestError::QuotaExceeded("daily limit".into()));

        let err = CommentIngestor::new(source.clone())
            .fetch(&video(), CommentOrder::Time, 10)
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::QuotaExceeded(_)));
        assert_eq!(source.requests().len(), 3);
    }
}
