//! GeminiBrain implementation using the Gemini REST API.

use std::time::Duration;

use concierge_core::{async_trait, hash_prompt, CompletionBackend, CompletionError};
use reqwest::{header::RETRY_AFTER, Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::{ConfigError, GeminiBrainConfig};

/// A completion backend that sends one prompt per call to Gemini.
///
/// GeminiBrain is stateless: conversation history is folded into the prompt
/// by the caller.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        info!("GeminiBrain initialized with model: {}", config.model);

        Ok(Self { client, config })
    }

    /// Create a GeminiBrain from environment variables.
    ///
    /// See [`GeminiBrainConfig::from_env`] for required environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = GeminiBrainConfig::from_env()?;
        Self::new(config)
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeminiBrainConfig {
        &self.config
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        let generation_config =
            if self.config.temperature.is_some() || self.config.max_output_tokens.is_some() {
                Some(GenerationConfig {
                    temperature: self.config.temperature,
                    max_output_tokens: self.config.max_output_tokens,
                })
            } else {
                None
            };

        GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
            generation_config,
        }
    }

    /// Work out how long the server wants us to back off.
    fn rate_limit_delay(&self, api_error: Option<&ApiError>, retry_after: Option<&str>) -> Duration {
        api_error
            .and_then(|e| e.error.retry_delay())
            .and_then(parse_retry_delay)
            .or_else(|| retry_after.and_then(parse_retry_delay))
            .unwrap_or(self.config.rate_limit_fallback)
    }
}

#[async_trait]
impl CompletionBackend for GeminiBrain {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let url = self.config.generate_url();
        let request = self.build_request(prompt);

        debug!(
            "Sending prompt to Gemini ({} chars, fingerprint {})",
            prompt.chars().count(),
            hash_prompt(prompt)
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CompletionError::Other(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let error_text = response.text().await.unwrap_or_default();
            let api_error = serde_json::from_str::<ApiError>(&error_text).ok();

            let exhausted = api_error
                .as_ref()
                .and_then(|e| e.error.status.as_deref())
                .map_or(false, |s| s == "RESOURCE_EXHAUSTED");

            if status == StatusCode::TOO_MANY_REQUESTS || exhausted {
                let retry_after = self.rate_limit_delay(api_error.as_ref(), retry_after.as_deref());
                warn!("Gemini rate limit hit, server advises {:?}", retry_after);
                return Err(CompletionError::RateLimited { retry_after });
            }

            let message = api_error
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            return Err(CompletionError::Other(format!(
                "API error ({}): {}",
                status.as_u16(),
                message
            )));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Other(format!("Failed to parse response: {}", e)))?;

        if let Some(ref usage) = completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        completion.text().ok_or_else(|| {
            let reason = completion
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            CompletionError::Other(format!("Empty response from Gemini ({})", reason))
        })
    }

    fn name(&self) -> &str {
        "GeminiBrain"
    }
}

/// Parse a server-advised delay such as `"17s"`, `"1.5s"` or `"30"`.
///
/// Returns `None` for anything that is not a non-negative number of seconds
/// representable as a `Duration`.
pub fn parse_retry_delay(value: &str) -> Option<Duration> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('s').unwrap_or(trimmed);
    let secs: f64 = number.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn brain_for(server: &mockito::Server) -> GeminiBrain {
        let config = GeminiBrainConfig::builder()
            .api_key("test-key")
            .api_url(server.url())
            .model("gemini-test")
            .rate_limit_fallback(Duration::from_secs(10))
            .build();
        GeminiBrain::new(config).unwrap()
    }

    const PATH: &str = "/v1beta/models/gemini-test:generateContent";

    #[test]
    fn test_parse_retry_delay() {
        assert_eq!(parse_retry_delay("17s"), Some(Duration::from_secs(17)));
        assert_eq!(parse_retry_delay("1.5s"), Some(Duration::from_millis(1500)));
        assert_eq!(parse_retry_delay(" 30 "), Some(Duration::from_secs(30)));
        assert_eq!(parse_retry_delay("soon"), None);
        assert_eq!(parse_retry_delay("-4s"), None);
        assert_eq!(parse_retry_delay("1e300s"), None);
        assert_eq!(parse_retry_delay("inf"), None);
    }

    #[test]
    fn test_brain_name() {
        let config = GeminiBrainConfig::builder().api_key("test-key").build();
        let brain = GeminiBrain::new(config).unwrap();
        assert_eq!(brain.name(), "GeminiBrain");
    }

    #[test]
    fn test_generation_config_omitted_by_default() {
        let config = GeminiBrainConfig::builder().api_key("test-key").build();
        let brain = GeminiBrain::new(config).unwrap();
        let request = brain.build_request("hi");
        assert!(request.generation_config.is_none());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["contents"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_complete_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", PATH)
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{"parts": [{"text": "Tell me about the rooms"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "candidates": [{
                        "content": {"role": "model", "parts": [{"text": "We have "}, {"text": "six rooms."}]},
                        "finishReason": "STOP"
                    }],
                    "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4, "totalTokenCount": 14}
                }"#,
            )
            .create_async()
            .await;

        let brain = brain_for(&server);
        let reply = brain.complete("Tell me about the rooms").await.unwrap();

        assert_eq!(reply, "We have six rooms.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rate_limit_uses_retry_info() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error": {
                    "code": 429,
                    "message": "Resource has been exhausted",
                    "status": "RESOURCE_EXHAUSTED",
                    "details": [
                        {"@type": "type.googleapis.com/google.rpc.QuotaFailure"},
                        {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "17s"}
                    ]
                }}"#,
            )
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        match err {
            CompletionError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(17))
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_falls_back_to_retry_after_header() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(429)
            .with_header("retry-after", "5")
            .with_body("slow down")
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        match err {
            CompletionError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(5))
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_without_advice_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(429)
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        match err {
            CompletionError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(10))
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_retry_delay_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(429)
            .with_header("retry-after", "1e300")
            .with_body(
                r#"{"error": {
                    "code": 429,
                    "message": "Resource has been exhausted",
                    "status": "RESOURCE_EXHAUSTED",
                    "details": [
                        {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": "1e300s"}
                    ]
                }}"#,
            )
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        match err {
            CompletionError::RateLimited { retry_after } => {
                assert_eq!(retry_after, Duration::from_secs(10))
            }
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_not_rate_limited() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"code": 500, "message": "Internal error", "status": "INTERNAL"}}"#)
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("Internal error"));
    }

    #[tokio::test]
    async fn test_empty_candidates_is_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#)
            .create_async()
            .await;

        let brain = brain_for(&server);
        let err = brain.complete("hello").await.unwrap_err();

        assert!(err.to_string().contains("SAFETY"));
    }
}
