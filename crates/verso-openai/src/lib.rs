// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider for Verso.
//!
//! This crate implements [`CompletionProvider`] over the `/chat/completions`
//! and `/completions` endpoints, including SSE token streaming for the latter.

pub mod client;
pub mod sse;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};
use verso_config::OpenAiConfig;
use verso_core::{
    ChatRequest, ChunkStream, CompletionProvider, CompletionRequest, CompletionResponse,
    HealthStatus, PluginAdapter, VersoError,
};

use crate::client::OpenAiClient;
use crate::types::{ChatCompletionRequest, TextCompletionRequest};

/// Environment variable consulted when no API key is configured.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// OpenAI provider implementing [`CompletionProvider`].
///
/// API key resolution order: config -> `OPENAI_API_KEY` env var -> error.
pub struct OpenAiProvider {
    client: OpenAiClient,
    chat_model: String,
    completion_model: String,
    max_tokens: u32,
}

impl OpenAiProvider {
    /// Creates a new provider from the `[openai]` configuration section.
    pub fn new(config: &OpenAiConfig) -> Result<Self, VersoError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = OpenAiClient::new(
            &api_key,
            config.organization.as_deref(),
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;

        info!(
            base_url = client.base_url(),
            chat_model = config.chat_model,
            completion_model = config.completion_model,
            "OpenAI provider initialized"
        );

        Ok(Self::with_client(client, config))
    }

    fn with_client(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            chat_model: config.chat_model.clone(),
            completion_model: config.completion_model.clone(),
            max_tokens: config.max_tokens,
        }
    }

    fn to_text_request(&self, request: CompletionRequest) -> TextCompletionRequest {
        TextCompletionRequest {
            model: request
                .model
                .unwrap_or_else(|| self.completion_model.clone()),
            prompt: request.prompt,
            temperature: request.temperature,
            max_tokens: request.max_tokens.or(Some(self.max_tokens)),
            stream: false,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<HealthStatus, VersoError> {
        // No API call: a probe would spend tokens.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VersoError> {
        debug!("OpenAI provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<CompletionResponse, VersoError> {
        let api_request = ChatCompletionRequest {
            model: request.model.unwrap_or_else(|| self.chat_model.clone()),
            messages: request.messages,
            temperature: request.temperature,
            stream: false,
        };
        let response = self.client.chat_completion(&api_request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VersoError::provider("chat response contained no choices"))?;

        Ok(CompletionResponse {
            text: choice.message.content.unwrap_or_default(),
            id: response.id,
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage,
        })
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VersoError> {
        let api_request = self.to_text_request(request);
        let response = self.client.text_completion(&api_request).await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| VersoError::provider("completion response contained no choices"))?;

        Ok(CompletionResponse {
            text: choice.text,
            id: response.id,
            model: response.model,
            finish_reason: choice.finish_reason,
            usage: response.usage,
        })
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, VersoError> {
        let api_request = self.to_text_request(request);
        debug!(model = api_request.model, "starting completion stream");
        self.client.stream_text_completion(&api_request).await
    }
}

/// Resolves the API key from config, falling back to `OPENAI_API_KEY`.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, VersoError> {
    resolve_api_key_with(config_key, || std::env::var(API_KEY_ENV).ok())
}

fn resolve_api_key_with(
    config_key: &Option<String>,
    env_lookup: impl FnOnce() -> Option<String>,
) -> Result<String, VersoError> {
    if let Some(key) = config_key.as_deref().filter(|k| !k.is_empty()) {
        return Ok(key.to_string());
    }

    env_lookup().filter(|k| !k.is_empty()).ok_or_else(|| {
        VersoError::Config(format!(
            "OpenAI API key not found. Set openai.api_key in config or {API_KEY_ENV} environment variable."
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use verso_core::{ChatMessage, DETERMINISTIC_TEMPERATURE};
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> OpenAiProvider {
        let config = OpenAiConfig {
            api_key: Some("sk-test".into()),
            base_url: format!("{}/v1", server.uri()),
            max_tokens: 99,
            ..OpenAiConfig::default()
        };
        OpenAiProvider::new(&config).unwrap()
    }

    #[test]
    fn api_key_from_config_wins() {
        let key = resolve_api_key_with(&Some("sk-config".into()), || Some("sk-env".into()));
        assert_eq!(key.unwrap(), "sk-config");
    }

    #[test]
    fn empty_config_key_falls_back_to_env() {
        let key = resolve_api_key_with(&Some(String::new()), || Some("sk-env".into()));
        assert_eq!(key.unwrap(), "sk-env");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = resolve_api_key_with(&None, || None).unwrap_err();
        assert!(matches!(err, VersoError::Config(_)));
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn adapter_identity_and_health() {
        let server = MockServer::start().await;
        let provider = provider_for(&server);
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.health_check().await.unwrap(), HealthStatus::Healthy);
        provider.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn chat_uses_default_model_and_zero_temperature() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "temperature": 0.0,
                "messages": [
                    {"role": "system", "content": "You translate."},
                    {"role": "user", "content": "Bonjour"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "chatcmpl-9",
                "model": "gpt-3.5-turbo-0125",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 1, "total_tokens": 13}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let response = provider
            .chat(ChatRequest::deterministic(vec![
                ChatMessage::system("You translate."),
                ChatMessage::user("Bonjour"),
            ]))
            .await
            .unwrap();
        assert_eq!(response.text, "Hello");
        assert_eq!(response.id, "chatcmpl-9");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
        assert_eq!(response.usage.unwrap().prompt_tokens, 12);
    }

    #[tokio::test]
    async fn complete_applies_configured_max_tokens() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-3.5-turbo-instruct",
                "max_tokens": 99,
                "temperature": 0.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cmpl-2",
                "model": "gpt-3.5-turbo-instruct",
                "choices": [{"text": "Hola", "index": 0, "finish_reason": "stop"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let response = provider
            .complete(CompletionRequest::deterministic("Translate"))
            .await
            .unwrap();
        assert_eq!(response.text, "Hola");
    }

    #[tokio::test]
    async fn empty_choices_is_a_provider_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cmpl-3", "model": "m", "choices": []
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .complete(CompletionRequest::deterministic("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, VersoError::Provider { .. }));
    }

    #[tokio::test]
    async fn stream_complete_yields_tokens() {
        let server = MockServer::start().await;
        let sse_body = concat!(
            "data: {\"id\":\"c\",\"choices\":[{\"text\":\"autumn\",\"index\":0}]}\n\n",
            "data: {\"id\":\"c\",\"choices\":[{\"text\":\" leaves\",\"index\":0}]}\n\n",
            "data: [DONE]\n\n",
        );
        Mock::given(method("POST"))
            .and(path("/v1/completions"))
            .and(body_partial_json(serde_json::json!({
                "stream": true,
                "temperature": DETERMINISTIC_TEMPERATURE
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse_body),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stream = provider_for(&server)
            .stream_complete(CompletionRequest::deterministic("poem"))
            .await
            .unwrap();
        let tokens: Vec<String> = stream.map(|c| c.unwrap().text).collect().await;
        assert_eq!(tokens, vec!["autumn", " leaves"]);
    }
}
