//! AI trait for text completion.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CompletionResult;

/// A text-completion model.
///
/// The reply is opaque text that is expected, but not guaranteed, to contain
/// a JSON payload. All structural checks happen in the pipeline.
#[async_trait]
pub trait AI: Send + Sync {
    /// Send one prompt, get the model's text back.
    async fn complete(&self, prompt: &str) -> CompletionResult<String>;
}

#[async_trait]
impl<T: AI + ?Sized> AI for Arc<T> {
    async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        (**self).complete(prompt).await
    }
}
