//! OpenAI-compatible client configuration for the completion backend.

use crate::config::BackendSettings;
use crate::error::{RecapError, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::time::Duration;
use url::Url;

/// Placeholder key sent to backends that do not check credentials (Ollama).
const PLACEHOLDER_API_KEY: &str = "ollama";

/// Resolve the OpenAI-compatible API base (`<host>/v1`) for a backend host.
pub fn api_base(host: &str) -> Result<String> {
    let url = Url::parse(host.trim())
        .map_err(|e| RecapError::Config(format!("Invalid backend host '{}': {}", host, e)))?;

    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(RecapError::Config(format!(
            "Backend host must be an http(s) URL, got '{}'",
            host
        )));
    }

    let base = url.as_str().trim_end_matches('/');
    if base.ends_with("/v1") {
        Ok(base.to_string())
    } else {
        Ok(format!("{}/v1", base))
    }
}

/// Create a client for the configured backend.
///
/// Failed requests are never retried. Fails with a configuration error when
/// the host cannot be resolved into a URL.
pub fn create_client(settings: &BackendSettings) -> Result<Client<OpenAIConfig>> {
    let api_base = api_base(settings.host())?;
    let api_key = settings
        .api_key
        .as_deref()
        .filter(|k| !k.is_empty())
        .unwrap_or(PLACEHOLDER_API_KEY);

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()?;

    let config = OpenAIConfig::new()
        .with_api_base(api_base)
        .with_api_key(api_key);

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry()))
}

/// A backoff policy that gives up after the first attempt.
fn no_retry() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_base_appends_v1() {
        assert_eq!(
            api_base("http://localhost:11434").unwrap(),
            "http://localhost:11434/v1"
        );
        assert_eq!(
            api_base("http://localhost:11434/").unwrap(),
            "http://localhost:11434/v1"
        );
        assert_eq!(
            api_base("https://llm.example.com/v1").unwrap(),
            "https://llm.example.com/v1"
        );
    }

    #[test]
    fn test_api_base_rejects_invalid_hosts() {
        assert!(matches!(api_base("localhost:11434"), Err(RecapError::Config(_))));
        assert!(matches!(api_base("not a url"), Err(RecapError::Config(_))));
        assert!(matches!(api_base("ftp://example.com"), Err(RecapError::Config(_))));
    }

    #[test]
    fn test_create_client_with_defaults() {
        assert!(create_client(&BackendSettings::default()).is_ok());
    }

    #[test]
    fn test_no_retry_policy_stops_immediately() {
        use backoff::backoff::Backoff;

        let mut policy = no_retry();
        std::thread::sleep(Duration::from_millis(1));
        assert_eq!(policy.next_backoff(), None);
    }

    #[test]
    fn test_create_client_invalid_host() {
        let settings = BackendSettings {
            host: Some("::nope::".to_string()),
            ..Default::default()
        };
        assert!(matches!(create_client(&settings), Err(RecapError::Config(_))));
    }
}
