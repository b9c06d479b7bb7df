//! Text generation against the completion backend.

mod openai;

pub use openai::ChatCompletionClient;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for text-generation backends.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Generate text for `content` under `system_prompt` with the given model.
    ///
    /// Fails with `BackendUnavailable` when the backend cannot be reached and
    /// `GenerationFailed` when it declines the request. Never retries.
    async fn generate(&self, system_prompt: &str, model: &str, content: &str) -> Result<String>;
}
