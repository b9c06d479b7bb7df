//! Chat completions over an OpenAI-compatible API.

use super::CompletionClient;
use crate::backend::create_client;
use crate::config::BackendSettings;
use crate::error::{RecapError, Result};
use async_openai::error::OpenAIError;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Completion client issuing one non-streaming chat completion per call.
pub struct ChatCompletionClient {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
}

impl ChatCompletionClient {
    /// Create a client for the configured backend.
    pub fn new(settings: &BackendSettings) -> Result<Self> {
        Ok(Self {
            client: create_client(settings)?,
        })
    }
}

/// Classify a client error as unreachable backend or declined request.
fn classify(err: OpenAIError) -> RecapError {
    match err {
        OpenAIError::Reqwest(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
            RecapError::BackendUnavailable(e.to_string())
        }
        OpenAIError::ApiError(api) => RecapError::GenerationFailed(api.message),
        other => RecapError::GenerationFailed(other.to_string()),
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionClient {
    #[instrument(skip(self, system_prompt, content), fields(content_len = content.len()))]
    async fn generate(&self, system_prompt: &str, model: &str, content: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt.to_string())
                .build()
                .map_err(|e| RecapError::GenerationFailed(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(content.to_string())
                .build()
                .map_err(|e| RecapError::GenerationFailed(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .build()
            .map_err(|e| RecapError::GenerationFailed(e.to_string()))?;

        let response = self.client.chat().create(request).await.map_err(classify)?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| RecapError::GenerationFailed("Empty response from backend".to_string()))?;

        debug!("Generated {} characters", text.len());
        Ok(text)
    }
}
