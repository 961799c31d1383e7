//! Error types for the YouTube client.

use thiserror::Error;

/// Result type for YouTube client operations.
pub type Result<T> = std::result::Result<T, YouTubeError>;

/// YouTube Data API errors.
///
/// Non-2xx responses are classified by the machine-readable `reason`
/// in the error body first and by HTTP status second.
#[derive(Debug, Error)]
pub enum YouTubeError {
    /// Missing API key or invalid client settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// No response reached us (connect failure, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Daily quota or rate limit exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The video has comments turned off
    #[error("Comments are disabled for this video")]
    CommentsDisabled,

    /// The video does not exist or is private
    #[error("Video not found")]
    VideoNotFound,

    /// The request was rejected as malformed (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Access denied for a reason other than quota or disabled comments
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other non-2xx response
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for YouTubeError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_decode() {
            YouTubeError::Parse(e.to_string())
        } else {
            YouTubeError::Network(e.to_string())
        }
    }
}
