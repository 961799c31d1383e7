//! Video id resolution from free-form URLs.
//!
//! Accepted shapes:
//! - `https://www.youtube.com/watch?v=<id>` (also `m.youtube.com`)
//! - `https://youtu.be/<id>`
//! - `https://www.youtube.com/embed/<id>`
//! - `https://www.youtube.com/v/<id>`
//!
//! Input that does not parse as a URL (no scheme, stray characters) gets a
//! second chance through a permissive pattern over the raw string.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

lazy_static! {
    static ref VIDEO_ID_REGEX: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap();

    // /embed/<id> and /v/<id>, nothing after the id
    static ref PATH_ID_REGEX: Regex = Regex::new(r"^/(?:embed|v)/([A-Za-z0-9_-]{11})$").unwrap();

    static ref FALLBACK_REGEX: Regex = Regex::new(
        r"(?:youtube\.com/(?:watch\?v=|embed/|v/)|youtu\.be/)([A-Za-z0-9_-]{11})"
    )
    .unwrap();
}

/// A canonical 11-character video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Accepts only `^[A-Za-z0-9_-]{11}$`.
    pub fn parse(value: &str) -> Option<Self> {
        VIDEO_ID_REGEX
            .is_match(value)
            .then(|| VideoId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        VideoId::parse(&value).ok_or_else(|| format!("invalid video id: {value}"))
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video id from a URL, or `None` if there isn't one.
///
/// Pure and deterministic.
pub fn resolve_video_id(input: &str) -> Option<VideoId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Url::parse(trimmed) {
        Ok(url) => from_parsed_url(&url),
        Err(_) => FALLBACK_REGEX
            .captures(trimmed)
            .and_then(|c| c.get(1))
            .and_then(|m| VideoId::parse(m.as_str())),
    }
}

fn from_parsed_url(url: &Url) -> Option<VideoId> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);

    match host {
        "youtube.com" | "m.youtube.com" => {
            let from_query = url
                .query_pairs()
                .find(|(k, _)| k == "v")
                .and_then(|(_, v)| VideoId::parse(&v));
            from_query.or_else(|| {
                PATH_ID_REGEX
                    .captures(url.path())
                    .and_then(|c| c.get(1))
                    .and_then(|m| VideoId::parse(m.as_str()))
            })
        }
        "youtu.be" => VideoId::parse(url.path().trim_start_matches('/')),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "dQw4w9WgXcQ";

    #[test]
    fn test_all_shapes_resolve_to_same_id() {
        let urls = [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/v/dQw4w9WgXcQ",
            "   https://www.youtube.com/watch?v=dQw4w9WgXcQ \n",
        ];
        for url in urls {
            assert_eq!(
                resolve_video_id(url).as_ref().map(VideoId::as_str),
                Some(ID),
                "failed for {url}"
            );
        }
    }

    #[test]
    fn test_unparseable_input_uses_fallback_pattern() {
        assert_eq!(
            resolve_video_id("www.youtube.com/watch?v=dQw4w9WgXcQ").map(String::from),
            Some(ID.to_string())
        );
        assert_eq!(
            resolve_video_id("youtu.be/dQw4w9WgXcQ").map(String::from),
            Some(ID.to_string())
        );
    }

    #[test]
    fn test_rejects_inputs_without_id() {
        let inputs = [
            "",
            "   ",
            "not a url",
            "https://www.youtube.com/watch?v=short",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQextra",
            "https://www.youtube.com/channel/UCuAXFkgsw1L7xaCfnd5JJOw",
            "https://www.youtube.com/embed/dQw4w9WgXcQ/extra",
            "https://example.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/",
        ];
        for input in inputs {
            assert!(resolve_video_id(input).is_none(), "accepted {input:?}");
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let url = "https://youtu.be/dQw4w9WgXcQ";
        assert_eq!(resolve_video_id(url), resolve_video_id(url));
    }

    #[test]
    fn test_video_id_serde_validates() {
        let ok: VideoId = serde_json::from_str("\"dQw4w9WgXcQ\"").unwrap();
        assert_eq!(ok.as_str(), ID);
        assert!(serde_json::from_str::<VideoId>("\"nope\"").is_err());
    }
}
