use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sort order accepted by `commentThreads.list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreadOrder {
    Relevance,
    #[default]
    Time,
}

impl ThreadOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreadOrder::Relevance => "relevance",
            ThreadOrder::Time => "time",
        }
    }
}

/// Parameters for one `commentThreads.list` page.
#[derive(Debug, Clone)]
pub struct CommentThreadsRequest {
    pub video_id: String,
    pub order: ThreadOrder,
    /// 1..=100, enforced by the API.
    pub max_results: u32,
    pub page_token: Option<String>,
}

/// One page of `commentThreads.list`.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadListResponse {
    #[serde(default)]
    pub items: Vec<CommentThread>,
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "totalResults")]
    pub total_results: Option<u32>,
    #[serde(rename = "resultsPerPage")]
    pub results_per_page: Option<u32>,
}

/// A comment thread. Only the top-level comment is consumed.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentThread {
    pub id: String,
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentThreadSnippet {
    #[serde(rename = "topLevelComment")]
    pub top_level_comment: TopLevelComment,
    #[serde(rename = "totalReplyCount", default)]
    pub total_reply_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopLevelComment {
    pub id: Option<String>,
    pub snippet: CommentSnippet,
}

/// The fields of a single comment.
#[derive(Debug, Clone, Deserialize)]
pub struct CommentSnippet {
    #[serde(rename = "authorDisplayName", default)]
    pub author_display_name: String,
    /// Rendered text; may contain HTML markup.
    #[serde(rename = "textDisplay", default)]
    pub text_display: String,
    #[serde(rename = "textOriginal")]
    pub text_original: Option<String>,
    #[serde(rename = "likeCount", default)]
    pub like_count: u64,
    #[serde(rename = "publishedAt")]
    pub published_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Error envelope returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
}
