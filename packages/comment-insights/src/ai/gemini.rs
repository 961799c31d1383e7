//! Gemini implementation of the AI trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use comment_insights::{AnalysisOrchestrator, GeminiAI};
//!
//! let ai = GeminiAI::from_env()?;
//! let report = AnalysisOrchestrator::new(ai).analyze(&comments).await?;
//! ```

use async_trait::async_trait;
use gemini_client::{GeminiClient, GeminiError, GenerateContentRequest};

use crate::error::{CompletionError, CompletionResult};
use crate::traits::ai::AI;

/// Low temperature keeps labels stable across runs.
const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Gemini-backed completion model.
#[derive(Clone)]
pub struct GeminiAI {
    client: GeminiClient,
    temperature: f32,
}

impl GeminiAI {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Create from environment variables `GEMINI_API_KEY` and `GEMINI_MODEL_NAME`.
    pub fn from_env() -> CompletionResult<Self> {
        GeminiClient::from_env()
            .map(Self::new)
            .map_err(|e| CompletionError::Config(e.to_string()))
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        self.client.model()
    }
}

#[async_trait]
impl AI for GeminiAI {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        let request = GenerateContentRequest::prompt(prompt).temperature(self.temperature);
        let response = self.client.generate_content(request).await.map_err(map_error)?;
        Ok(response.text)
    }
}

fn map_error(error: GeminiError) -> CompletionError {
    match error {
        GeminiError::Config(msg) => CompletionError::Config(msg),
        GeminiError::Network(msg) => CompletionError::Network(msg),
        GeminiError::RateLimited(msg) => CompletionError::RateLimited(msg),
        GeminiError::Api { status, message } => {
            CompletionError::Upstream(format!("{status}: {message}"))
        }
        GeminiError::Parse(msg) => CompletionError::Upstream(format!("unreadable response: {msg}")),
    }
}
