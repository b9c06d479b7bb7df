//! Summarization built on a completion backend.

use crate::completion::{ChatCompletionClient, CompletionClient};
use crate::config::{Prompts, Settings};
use crate::error::{RecapError, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Summarizes text with a fixed system prompt and model.
///
/// The same instance serves per-video summaries and the playlist digest, so
/// both stages share one prompt.
#[derive(Clone)]
pub struct Summarizer {
    client: Arc<dyn CompletionClient>,
    model: String,
    system_prompt: String,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl Summarizer {
    /// Create a summarizer with the default prompt.
    pub fn new(client: Arc<dyn CompletionClient>, model: &str) -> Result<Self> {
        if model.trim().is_empty() {
            return Err(RecapError::Config("Model name must not be empty".to_string()));
        }

        Ok(Self {
            client,
            model: model.to_string(),
            system_prompt: Prompts::default().summary.system,
        })
    }

    /// Create a summarizer talking to the configured backend.
    ///
    /// Uses `model` when given, the configured default model otherwise, and the
    /// prompt from the custom prompts directory if one is set.
    pub fn from_settings(settings: &Settings, model: Option<&str>) -> Result<Self> {
        let model = model.unwrap_or(&settings.backend.default_model);
        let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
        let client = Arc::new(ChatCompletionClient::new(&settings.backend)?);

        Ok(Self::new(client, model)?.with_system_prompt(&prompts.summary.system))
    }

    /// Set a custom system prompt.
    pub fn with_system_prompt(mut self, prompt: &str) -> Self {
        self.system_prompt = prompt.to_string();
        self
    }

    /// The bound model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The bound system prompt.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Summarize `text`, returning the backend output unchanged.
    pub async fn summarize(&self, text: &str) -> Result<String> {
        debug!("Summarizing {} characters with {}", text.len(), self.model);
        self.client
            .generate(&self.system_prompt, &self.model, text)
            .await
    }

    /// Read the file at `path` and summarize its contents.
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn summarize_file(&self, path: &Path) -> Result<String> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RecapError::from_io(e, path))?;
        self.summarize(&content).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::testing::StubClient;

    #[tokio::test]
    async fn test_summarize_passes_prompt_and_model() {
        let stub = Arc::new(StubClient::new());
        let summarizer = Summarizer::new(stub.clone(), "gemma3:4b")
            .unwrap()
            .with_system_prompt("Be brief.");

        let summary = summarizer.summarize("hello world").await.unwrap();
        assert_eq!(summary, "sum:hello world");

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].system_prompt, "Be brief.");
        assert_eq!(calls[0].model, "gemma3:4b");
        assert_eq!(calls[0].content, "hello world");
    }

    #[tokio::test]
    async fn test_summarize_file_reads_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.txt");
        std::fs::write(&path, "transcript text").unwrap();

        let summarizer = Summarizer::new(Arc::new(StubClient::new()), "m").unwrap();
        assert_eq!(
            summarizer.summarize_file(&path).await.unwrap(),
            "sum:transcript text"
        );
    }

    #[tokio::test]
    async fn test_summarize_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");

        let stub = Arc::new(StubClient::new());
        let summarizer = Summarizer::new(stub.clone(), "m").unwrap();

        let err = summarizer.summarize_file(&path).await.unwrap_err();
        assert!(matches!(err, RecapError::NotFound(p) if p == path));
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_errors_are_not_translated() {
        let summarizer = Summarizer::new(Arc::new(StubClient::failing_on("x")), "m").unwrap();
        let err = summarizer.summarize("x").await.unwrap_err();
        assert!(matches!(err, RecapError::GenerationFailed(_)));
    }

    #[test]
    fn test_empty_model_is_a_configuration_error() {
        let err = Summarizer::new(Arc::new(StubClient::new()), " ").unwrap_err();
        assert!(matches!(err, RecapError::Config(_)));
    }

    #[test]
    fn test_from_settings_uses_default_model() {
        let settings = Settings::default();
        let summarizer = Summarizer::from_settings(&settings, None).unwrap();
        assert_eq!(summarizer.model(), "gemma3:4b");

        let summarizer = Summarizer::from_settings(&settings, Some("llama3.2")).unwrap();
        assert_eq!(summarizer.model(), "llama3.2");
    }

    #[test]
    fn test_from_settings_invalid_host() {
        let mut settings = Settings::default();
        settings.backend.host = Some("nonsense".to_string());
        let err = Summarizer::from_settings(&settings, None).unwrap_err();
        assert!(matches!(err, RecapError::Config(_)));
    }
}
