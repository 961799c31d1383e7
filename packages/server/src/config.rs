use anyhow::{Context, Result};
use comment_insights::ClassifierConfig;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
///
/// API keys are optional at boot. A request that needs a missing key fails
/// with a CONFIG_ERROR instead.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub youtube_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    /// Per-call timeout for YouTube and Gemini requests
    pub upstream_timeout: Duration,
    /// Whole-request timeout for the HTTP layer
    pub request_timeout: Duration,
    pub classifier: ClassifierConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let classifier = ClassifierConfig::new()
            .with_batch_size(parse_var("CLASSIFY_BATCH_SIZE", 50)?)
            .with_batch_interval(Duration::from_millis(parse_var(
                "CLASSIFY_BATCH_INTERVAL_MS",
                100,
            )?))
            .with_max_concurrency(parse_var("CLASSIFY_MAX_CONCURRENCY", 1)?);

        Ok(Self {
            port: parse_var("PORT", 8080)?,
            youtube_api_key: non_empty_var("YOUTUBE_API_KEY"),
            gemini_api_key: non_empty_var("GEMINI_API_KEY"),
            gemini_model: non_empty_var("GEMINI_MODEL_NAME"),
            upstream_timeout: Duration::from_secs(parse_var("UPSTREAM_TIMEOUT_SECS", 30)?),
            request_timeout: Duration::from_secs(parse_var("REQUEST_TIMEOUT_SECS", 300)?),
            classifier,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a valid number")),
        None => Ok(default),
    }
}
