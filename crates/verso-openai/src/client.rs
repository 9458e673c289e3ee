// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat and completions endpoints.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! bearer authentication, and streaming SSE responses.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use verso_core::{ChunkStream, VersoError};

use crate::sse;
use crate::types::{
    ApiErrorResponse, ChatCompletionRequest, ChatCompletionResponse, TextCompletionRequest,
    TextCompletionResponse,
};

const CHAT_PATH: &str = "/chat/completions";
const COMPLETIONS_PATH: &str = "/completions";

/// HTTP client for OpenAI-compatible APIs.
///
/// Requests are never retried. A failed call surfaces as
/// [`VersoError::Provider`] with the API's own error message when present.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new client.
    ///
    /// `base_url` is the API root (e.g. `https://api.openai.com/v1`); a
    /// trailing slash is tolerated.
    pub fn new(
        api_key: &str,
        organization: Option<&str>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, VersoError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| VersoError::Config(format!("invalid API key header value: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        if let Some(org) = organization {
            headers.insert(
                "OpenAI-Organization",
                HeaderValue::from_str(org).map_err(|e| {
                    VersoError::Config(format!("invalid organization header value: {e}"))
                })?,
            );
        }
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| VersoError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the API root this client posts to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a non-streaming chat completion request.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, VersoError> {
        let mut req = request.clone();
        req.stream = false;
        let response = self.post(CHAT_PATH, &req).await?;
        read_json(response).await
    }

    /// Sends a non-streaming plain completion request.
    pub async fn text_completion(
        &self,
        request: &TextCompletionRequest,
    ) -> Result<TextCompletionResponse, VersoError> {
        let mut req = request.clone();
        req.stream = false;
        let response = self.post(COMPLETIONS_PATH, &req).await?;
        read_json(response).await
    }

    /// Sends a streaming plain completion request and returns its chunks.
    pub async fn stream_text_completion(
        &self,
        request: &TextCompletionRequest,
    ) -> Result<ChunkStream, VersoError> {
        let mut req = request.clone();
        req.stream = true;
        let response = self.post(COMPLETIONS_PATH, &req).await?;
        Ok(sse::parse_completion_stream(response))
    }

    /// Posts `body` to `path` and returns the response if the status is 2xx.
    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, VersoError> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| VersoError::Provider {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, path, "provider response received");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_err) => api_err.error.to_string(),
            Err(_) => format!("API returned {status}: {body}"),
        };
        Err(VersoError::provider(message))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, VersoError> {
    let body = response.text().await.map_err(|e| VersoError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| VersoError::Provider {
        message: format!("failed to parse API response: {e}"),
        source: Some(Box::new(e)),
    })
}
