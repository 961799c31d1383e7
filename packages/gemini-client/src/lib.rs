//! Pure Gemini REST API client
//!
//! A minimal client for the Gemini `generateContent` endpoint with no
//! domain-specific logic. A prompt goes in, the model's text comes out.
//!
//! # Example
//!
//! ```rust,ignore
//! use gemini_client::GeminiClient;
//!
//! let client = GeminiClient::from_env()?.with_model("gemini-2.5-flash");
//!
//! let text = client.generate_text("What is Rust in one sentence?").await?;
//! ```

pub mod error;
pub mod types;

pub use error::{GeminiError, Result};
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Pure Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: Client,
    api_key: Arc<SecretString>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            api_key: Arc::new(SecretString::new(api_key.into().into_boxed_str())),
            base_url: BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create from environment variables `GEMINI_API_KEY` and optional `GEMINI_MODEL_NAME`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::Config("GEMINI_API_KEY not set".into()))?;
        let client = Self::new(api_key);
        Ok(match std::env::var("GEMINI_MODEL_NAME") {
            Ok(model) if !model.trim().is_empty() => client.with_model(model),
            _ => client,
        })
    }

    /// Set a custom base URL (for proxies, tests, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model (default: gemini-2.0-flash).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the per-request timeout. Expiry surfaces as [`GeminiError::Network`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single-prompt convenience wrapper around [`Self::generate_content`].
    pub async fn generate_text(&self, prompt: &str) -> Result<String> {
        let response = self
            .generate_content(GenerateContentRequest::prompt(prompt))
            .await?;
        Ok(response.text)
    }

    /// Content generation.
    ///
    /// Returns the text parts of the first candidate, concatenated.
    pub async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(GeminiError::Config("GEMINI_API_KEY not set".into()));
        }

        let start = std::time::Instant::now();

        let response = self
            .http_client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", self.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(error = %e, "Gemini request failed");
                GeminiError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API error");
            return Err(classify_error(status.as_u16(), &error_text));
        }

        let raw: types::GenerateContentResponseRaw = response
            .json()
            .await
            .map_err(|e| GeminiError::Parse(e.without_url().to_string()))?;

        if let Some(reason) = raw
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: format!("Prompt blocked: {}", reason),
            });
        }

        let candidate = raw.candidates.into_iter().next().ok_or_else(|| GeminiError::Api {
            status: status.as_u16(),
            message: "No candidates from Gemini".into(),
        })?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: format!(
                    "Empty completion (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            });
        }

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            total_tokens = raw.usage_metadata.as_ref().map(|u| u.total_token_count),
            "Gemini generateContent"
        );

        Ok(GenerateContentResponse {
            text,
            usage: raw.usage_metadata,
        })
    }
}

fn classify_error(status: u16, body: &str) -> GeminiError {
    let parsed = serde_json::from_str::<types::ApiErrorResponse>(body).ok();
    let message = parsed
        .as_ref()
        .map(|p| p.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());
    let exhausted = parsed
        .as_ref()
        .is_some_and(|p| p.error.status == "RESOURCE_EXHAUSTED");

    if status == 429 || exhausted {
        GeminiError::RateLimited(message)
    } else {
        GeminiError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = GeminiClient::new("g-test")
            .with_base_url("https://custom.api.com/")
            .with_model("gemini-2.5-pro");

        assert_eq!(client.api_key.expose_secret(), "g-test");
        assert_eq!(client.base_url(), "https://custom.api.com");
        assert_eq!(client.model(), "gemini-2.5-pro");
    }

    #[test]
    fn test_classify_rate_limited() {
        let body = r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(classify_error(429, body), GeminiError::RateLimited(_)));
    }

    #[test]
    fn test_classify_api_error_keeps_message() {
        let body = r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#;
        match classify_error(400, body) {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
