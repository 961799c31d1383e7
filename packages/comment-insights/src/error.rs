//! Typed errors for the comment-insights library.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Every error maps to a
//! stable [`ErrorCode`] so callers can branch on the failure kind without
//! parsing message text.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Machine-readable error code carried by every surfaced error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigError,
    ValidationError,
    InvalidUrl,
    NoComments,
    QuotaExceeded,
    CommentsDisabled,
    VideoNotFound,
    InvalidRequest,
    Forbidden,
    UpstreamError,
    NetworkError,
    ParseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::InvalidUrl => "INVALID_URL",
            ErrorCode::NoComments => "NO_COMMENTS",
            ErrorCode::QuotaExceeded => "QUOTA_EXCEEDED",
            ErrorCode::CommentsDisabled => "COMMENTS_DISABLED",
            ErrorCode::VideoNotFound => "VIDEO_NOT_FOUND",
            ErrorCode::InvalidRequest => "INVALID_REQUEST",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::UpstreamError => "UPSTREAM_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ParseError => "PARSE_ERROR",
        }
    }

    /// Whether the caller may retry the whole operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::QuotaExceeded | ErrorCode::NetworkError)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from comment ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Missing credential or unusable client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Caller input rejected before any request was made
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    /// Upstream quota or rate limit exhausted
    #[error("API quota exceeded, try again later: {0}")]
    QuotaExceeded(String),

    /// The video has comments turned off
    #[error("comments are disabled for this video")]
    CommentsDisabled,

    /// The video does not exist
    #[error("video not found: {video_id}")]
    VideoNotFound { video_id: String },

    /// Upstream rejected the request as malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream denied access
    #[error("access denied: {0}")]
    Forbidden(String),

    /// Any other non-2xx upstream response
    #[error("upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    /// No response reached the upstream (connect failure, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Upstream page did not match the expected structure
    #[error("failed to parse comment page: {0}")]
    Parse(String),
}

impl IngestError {
    pub fn code(&self) -> ErrorCode {
        match self {
            IngestError::Config(_) => ErrorCode::ConfigError,
            IngestError::Validation { .. } => ErrorCode::ValidationError,
            IngestError::QuotaExceeded(_) => ErrorCode::QuotaExceeded,
            IngestError::CommentsDisabled => ErrorCode::CommentsDisabled,
            IngestError::VideoNotFound { .. } => ErrorCode::VideoNotFound,
            IngestError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            IngestError::Forbidden(_) => ErrorCode::Forbidden,
            IngestError::Upstream { .. } => ErrorCode::UpstreamError,
            IngestError::Network(_) => ErrorCode::NetworkError,
            IngestError::Parse(_) => ErrorCode::ParseError,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

/// Errors from the AI completion seam.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Missing credential or unusable client configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// Rate limit or quota exhausted
    #[error("AI quota exceeded: {0}")]
    RateLimited(String),

    /// Non-2xx or otherwise unusable upstream response
    #[error("AI service error: {0}")]
    Upstream(String),

    /// No response reached the upstream (connect failure, timeout)
    #[error("network error: {0}")]
    Network(String),
}

impl CompletionError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CompletionError::Config(_) => ErrorCode::ConfigError,
            CompletionError::RateLimited(_) => ErrorCode::QuotaExceeded,
            CompletionError::Upstream(_) => ErrorCode::UpstreamError,
            CompletionError::Network(_) => ErrorCode::NetworkError,
        }
    }
}

/// Errors from sentiment analysis.
///
/// Only classification can fail an analysis; insight synthesis degrades to
/// placeholder content instead (see [`crate::pipeline::synthesize`]).
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Nothing to analyze; rejected before any external call
    #[error("no comments to analyze")]
    NoComments,

    /// Caller input rejected
    #[error("invalid input: {reason}")]
    Validation { reason: String },

    /// A batch reply did not match the expected structure
    #[error("failed to parse classification for batch {batch}: {reason}")]
    Parse { batch: usize, reason: String },

    /// The completion call for a batch failed
    #[error("classification request failed: {0}")]
    Completion(#[from] CompletionError),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::NoComments => ErrorCode::NoComments,
            AnalysisError::Validation { .. } => ErrorCode::ValidationError,
            AnalysisError::Parse { .. } => ErrorCode::ParseError,
            AnalysisError::Completion(e) => e.code(),
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }
}

/// Result type alias for ingestion.
pub type IngestResult<T> = std::result::Result<T, IngestError>;

/// Result type alias for AI completion calls.
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;

/// Result type alias for analysis.
pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinguish_quota_from_disabled() {
        assert_eq!(
            IngestError::QuotaExceeded("daily".into()).code().as_str(),
            "QUOTA_EXCEEDED"
        );
        assert_eq!(IngestError::CommentsDisabled.code().as_str(), "COMMENTS_DISABLED");
    }

    #[test]
    fn test_only_quota_and_network_are_retryable() {
        assert!(IngestError::Network("reset".into()).is_retryable());
        assert!(IngestError::QuotaExceeded("daily".into()).is_retryable());
        assert!(!IngestError::Config("missing".into()).is_retryable());
        assert!(!IngestError::CommentsDisabled.is_retryable());
        assert!(!AnalysisError::Parse { batch: 0, reason: "bad".into() }.is_retryable());
        assert!(AnalysisError::from(CompletionError::Network("timeout".into())).is_retryable());
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::VideoNotFound).unwrap();
        assert_eq!(json, "\"VIDEO_NOT_FOUND\"");
    }
}
