//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the comment-insights
//! library without making real AI or network calls.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::{CompletionError, CompletionResult, IngestError, IngestResult};
use crate::traits::{
    ai::AI,
    source::{CommentPage, CommentSource, PageRequest},
};
use crate::types::{comment::CommentItem, sentiment::SentimentLabel};

type Responder = Arc<dyn Fn(&str) -> CompletionResult<String> + Send + Sync>;

/// A mock AI implementation for testing.
///
/// Reply order: scripted replies (FIFO), then the custom responder, then a
/// deterministic default that understands both pipeline prompts. Clones
/// share scripted replies and call history.
#[derive(Clone, Default)]
pub struct MockAI {
    /// Scripted replies, consumed one per call
    replies: Arc<Mutex<VecDeque<CompletionResult<String>>>>,

    /// Custom reply function
    responder: Option<Responder>,

    /// Prompts received, for assertions
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockAI {
    /// Create a new mock AI with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply for the next unanswered call.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queue an error for the next unanswered call.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    /// Answer every unscripted call with `responder`.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str) -> CompletionResult<String> + Send + Sync + 'static,
    {
        self.responder = Some(Arc::new(responder));
        self
    }

    /// Get all prompts sent to this mock.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// Number of classification prompts received.
    pub fn classify_calls(&self) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|p| is_classify_prompt(p))
            .count()
    }

    /// Clear call history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn default_reply(&self, prompt: &str) -> String {
        if is_classify_prompt(prompt) {
            default_classification(prompt)
        } else {
            default_insights()
        }
    }
}

#[async_trait]
impl AI for MockAI {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        self.calls.write().unwrap().push(prompt.to_string());

        if let Some(reply) = self.replies.lock().unwrap().pop_front() {
            return reply;
        }
        if let Some(responder) = &self.responder {
            return responder(prompt);
        }
        Ok(self.default_reply(prompt))
    }
}

const ID_MARKER: &str = "[ID: ";

fn is_classify_prompt(prompt: &str) -> bool {
    prompt.contains(ID_MARKER)
}

/// Comment ids and texts enumerated in a classification prompt.
pub fn prompt_entries(prompt: &str) -> Vec<(String, String)> {
    prompt
        .lines()
        .filter_map(|line| {
            let rest = &line[line.find(ID_MARKER)? + ID_MARKER.len()..];
            let end = rest.find("] ").or_else(|| rest.strip_suffix(']').map(str::len))?;
            let text = rest.get(end + 2..).unwrap_or_default();
            Some((rest[..end].to_string(), text.to_string()))
        })
        .collect()
}

/// Keyword sentiment used by the default mock reply.
pub fn keyword_sentiment(text: &str) -> SentimentLabel {
    const POSITIVE: &[&str] = &["love", "great", "awesome", "amazing", "best", "thank"];
    const NEGATIVE: &[&str] = &["hate", "bad", "terrible", "worst", "boring", "awful"];

    let lower = text.to_lowercase();
    if POSITIVE.iter().any(|w| lower.contains(w)) {
        SentimentLabel::Positive
    } else if NEGATIVE.iter().any(|w| lower.contains(w)) {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

fn default_classification(prompt: &str) -> String {
    let records: Vec<_> = prompt_entries(prompt)
        .into_iter()
        .map(|(id, text)| {
            json!({
                "commentId": id,
                "sentiment": keyword_sentiment(&text).as_str(),
                "confidence": 0.9
            })
        })
        .collect();
    serde_json::Value::Array(records).to_string()
}

fn default_insights() -> String {
    let category = |label: &str| {
        json!({
            "summary": format!("Summary of {label} comments"),
            "keyPoints": [format!("{label} point one"), format!("{label} point two")],
            "insights": format!("Insight for {label} comments")
        })
    };
    json!({
        "positive": category("positive"),
        "negative": category("negative"),
        "neutral": category("neutral")
    })
    .to_string()
}

/// A mock comment source serving pages keyed by continuation token.
#[derive(Clone, Default)]
pub struct MockCommentSource {
    /// Pages by the token that requests them (`None` is the first page)
    pages: Arc<RwLock<HashMap<Option<String>, CommentPage>>>,

    /// Injected failures by token
    failures: Arc<RwLock<HashMap<Option<String>, fn() -> IngestError>>>,

    /// Requests received, for assertions
    requests: Arc<RwLock<Vec<PageRequest>>>,
}

impl MockCommentSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Split `items` into pages of `page_size`, chained by tokens `page-1`, `page-2`, ...
    pub fn paged(items: Vec<CommentItem>, page_size: usize) -> Self {
        let source = Self::new();
        let chunks: Vec<Vec<CommentItem>> = items
            .chunks(page_size.max(1))
            .map(<[CommentItem]>::to_vec)
            .collect();

        if chunks.is_empty() {
            return source.with_page(None, Vec::new(), None);
        }

        let last = chunks.len() - 1;
        chunks
            .into_iter()
            .enumerate()
            .fold(source, |source, (i, chunk)| {
                let token = (i > 0).then(|| format!("page-{i}"));
                let next = (i < last).then(|| format!("page-{}", i + 1));
                source.with_page(token.as_deref(), chunk, next.as_deref())
            })
    }

    /// Serve `items` for `token`, pointing at `next`.
    pub fn with_page(self, token: Option<&str>, items: Vec<CommentItem>, next: Option<&str>) -> Self {
        let page = CommentPage {
            items,
            next_page_token: next.map(str::to_string),
        };
        self.pages
            .write()
            .unwrap()
            .insert(token.map(str::to_string), page);
        self
    }

    /// Fail the request for `token` with the error `make` builds.
    pub fn failing_on(self, token: Option<&str>, make: fn() -> IngestError) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(token.map(str::to_string), make);
        self
    }

    /// Get all page requests received.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl CommentSource for MockCommentSource {
    async fn fetch_page(&self, request: &PageRequest) -> IngestResult<CommentPage> {
        self.requests.write().unwrap().push(request.clone());

        if let Some(make) = self.failures.read().unwrap().get(&request.page_token) {
            return Err(make());
        }

        self.pages
            .read()
            .unwrap()
            .get(&request.page_token)
            .cloned()
            .ok_or_else(|| IngestError::InvalidRequest("unknown page token".into()))
    }
}

/// `n` comments with ids `comment-0..n`, cycling through a positive, a
/// negative and a neutral text.
pub fn fake_comments(n: usize) -> Vec<CommentItem> {
    const TEXTS: [&str; 3] = [
        "I love this video, great editing",
        "Terrible audio, really bad mix",
        "What camera did you use?",
    ];
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    (0..n)
        .map(|i| {
            CommentItem::new(
                format!("comment-{i}"),
                format!("@viewer{i}"),
                TEXTS[i % TEXTS.len()],
                (i % 7) as u64,
                start + Duration::minutes(i as i64),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::prompts::format_classify_prompt;

    #[test]
    fn test_prompt_entries_round_trip_ids() {
        let prompt = format_classify_prompt(&fake_comments(3));
        let entries = prompt_entries(&prompt);

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, "comment-0");
        assert!(entries[2].1.starts_with("What camera"));
    }

    #[tokio::test]
    async fn test_scripted_replies_come_first() {
        let ai = MockAI::new()
            .with_reply("first")
            .with_error(CompletionError::Network("down".into()));

        assert_eq!(ai.complete("x").await.unwrap(), "first");
        assert!(ai.complete("x").await.is_err());
        assert!(ai.complete("x").await.unwrap().contains("positive"));
        assert_eq!(ai.call_count(), 3);
    }

    #[test]
    fn test_paged_chains_tokens() {
        let source = MockCommentSource::paged(fake_comments(5), 2);
        let pages = source.pages.read().unwrap();

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[&None].next_page_token.as_deref(), Some("page-1"));
        assert_eq!(pages[&Some("page-2".to_string())].next_page_token, None);
    }
}
