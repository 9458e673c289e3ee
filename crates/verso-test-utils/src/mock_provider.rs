// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockProvider` implements `CompletionProvider` with pre-configured
//! responses and token scripts, enabling fast, CI-runnable tests without
//! external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::stream;
use tokio::sync::Mutex;

use verso_core::{
    ChatRequest, ChunkStream, CompletionProvider, CompletionRequest, CompletionResponse,
    HealthStatus, PluginAdapter, StreamChunk, TokenUsage, VersoError,
};

const DEFAULT_RESPONSE: &str = "mock response";

/// A request observed by the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedRequest {
    Chat(ChatRequest),
    Complete(CompletionRequest),
    Stream(CompletionRequest),
}

#[derive(Debug, Clone)]
struct StreamScript {
    tokens: Vec<String>,
    failure: Option<String>,
}

/// A mock completion provider.
///
/// Non-streaming responses are popped from a FIFO queue; when it is empty a
/// default "mock response" text is returned. Streaming calls pop a token
/// script, falling back to the next response split at word boundaries.
/// Every stream ends with an empty chunk carrying `finish_reason = "stop"`
/// unless the script injects a failure.
pub struct MockProvider {
    responses: Mutex<VecDeque<String>>,
    scripts: Mutex<VecDeque<StreamScript>>,
    errors: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<RecordedRequest>>,
    token_delay: Option<Duration>,
    calls: AtomicUsize,
    open_streams: Arc<AtomicUsize>,
}

impl MockProvider {
    /// Create a new mock provider with empty queues.
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            scripts: Mutex::new(VecDeque::new()),
            errors: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            token_delay: None,
            calls: AtomicUsize::new(0),
            open_streams: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a mock provider pre-loaded with the given responses.
    pub fn with_responses(responses: Vec<String>) -> Self {
        let mut provider = Self::new();
        provider.responses.get_mut().extend(responses);
        provider
    }

    /// Queue a stream that yields `tokens` and then finishes normally.
    pub fn with_stream_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts.get_mut().push_back(StreamScript {
            tokens: tokens.into_iter().map(Into::into).collect(),
            failure: None,
        });
        self
    }

    /// Queue a stream that yields `tokens` and then fails with `message`.
    pub fn with_failing_stream<I, S>(mut self, tokens: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scripts.get_mut().push_back(StreamScript {
            tokens: tokens.into_iter().map(Into::into).collect(),
            failure: Some(message.into()),
        });
        self
    }

    /// Make the next call fail before producing anything.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.errors.get_mut().push_back(message.into());
        self
    }

    /// Sleep before every streamed token.
    pub fn with_token_delay(mut self, delay: Duration) -> Self {
        self.token_delay = Some(delay);
        self
    }

    /// Add a response to the end of the queue.
    pub async fn add_response(&self, text: String) {
        self.responses.lock().await.push_back(text);
    }

    /// Number of provider calls made so far, streaming included.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Streams handed out and not yet dropped.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    /// Every request seen so far, in call order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }

    async fn begin_call(&self, request: RecordedRequest) -> Result<(), VersoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(request);
        match self.errors.lock().await.pop_front() {
            Some(message) => Err(VersoError::provider(message)),
            None => Ok(()),
        }
    }

    async fn next_response(&self) -> String {
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| DEFAULT_RESPONSE.to_string())
    }

    async fn next_script(&self) -> StreamScript {
        if let Some(script) = self.scripts.lock().await.pop_front() {
            return script;
        }
        StreamScript {
            tokens: split_words(&self.next_response().await),
            failure: None,
        }
    }

    fn response(text: String, model: Option<String>) -> CompletionResponse {
        CompletionResponse {
            text,
            id: format!("mock-resp-{}", uuid::Uuid::new_v4()),
            model: model.unwrap_or_else(|| "mock-model".to_string()),
            finish_reason: Some("stop".to_string()),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 20,
                total_tokens: 30,
            }),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Split text into tokens that concatenate back to the original.
fn split_words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if ch.is_whitespace() && !current.is_empty() && !current.trim().is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Decrements the open stream counter when the stream is dropped.
struct OpenStreamGuard(Arc<AtomicUsize>);

impl OpenStreamGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for OpenStreamGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct StreamState {
    tokens: VecDeque<String>,
    failure: Option<String>,
    finished: bool,
    delay: Option<Duration>,
    _guard: OpenStreamGuard,
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    async fn health_check(&self) -> Result<HealthStatus, VersoError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), VersoError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn chat(&self, request: ChatRequest) -> Result<CompletionResponse, VersoError> {
        let model = request.model.clone();
        self.begin_call(RecordedRequest::Chat(request)).await?;
        Ok(Self::response(self.next_response().await, model))
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VersoError> {
        let model = request.model.clone();
        self.begin_call(RecordedRequest::Complete(request)).await?;
        Ok(Self::response(self.next_response().await, model))
    }

    async fn stream_complete(&self, request: CompletionRequest) -> Result<ChunkStream, VersoError> {
        self.begin_call(RecordedRequest::Stream(request)).await?;
        let script = self.next_script().await;

        let state = StreamState {
            tokens: script.tokens.into(),
            failure: script.failure,
            finished: false,
            delay: self.token_delay,
            _guard: OpenStreamGuard::new(Arc::clone(&self.open_streams)),
        };

        let chunks = stream::unfold(state, |mut state| async move {
            if state.finished {
                return None;
            }
            if let Some(delay) = state.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(token) = state.tokens.pop_front() {
                return Some((Ok(StreamChunk::token(token)), state));
            }
            state.finished = true;
            let item = match state.failure.take() {
                Some(message) => Err(VersoError::provider(message)),
                None => Ok(StreamChunk {
                    text: String::new(),
                    finish_reason: Some("stop".to_string()),
                }),
            };
            Some((item, state))
        });

        Ok(Box::pin(chunks))
    }
}
