//! Normalized comment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single top-level comment, normalized from the upstream record.
///
/// Created once by ingestion and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentItem {
    /// Opaque id, unique per video.
    #[serde(rename = "commentId", alias = "id")]
    pub id: String,

    pub author: String,

    /// Display text. May contain inline markup; it is kept as-is.
    pub text: String,

    pub like_count: u64,

    pub published_at: DateTime<Utc>,
}

impl CommentItem {
    pub fn new(
        id: impl Into<String>,
        author: impl Into<String>,
        text: impl Into<String>,
        like_count: u64,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            text: text.into(),
            like_count,
            published_at,
        }
    }

    /// Text on a single line, for prompt enumeration.
    pub fn single_line_text(&self) -> String {
        self.text.replace(['\r', '\n'], " ")
    }
}

/// Ordering requested from the comment-listing service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    Relevance,
    #[default]
    Time,
}

impl CommentOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommentOrder::Relevance => "relevance",
            CommentOrder::Time => "time",
        }
    }
}
