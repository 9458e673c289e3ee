// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider trait for LLM completion services.

use async_trait::async_trait;

use crate::error::VersoError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatRequest, ChunkStream, CompletionRequest, CompletionResponse};

/// Adapter for an external completion service.
///
/// A single instance is constructed at startup and shared by every prompt
/// method, so implementations must be safe to call concurrently.
#[async_trait]
pub trait CompletionProvider: PluginAdapter {
    /// Sends role-tagged messages to a chat model and returns the full reply.
    async fn chat(&self, request: ChatRequest) -> Result<CompletionResponse, VersoError>;

    /// Sends a plain prompt to a completion model and returns the full reply.
    async fn complete(&self, request: CompletionRequest)
    -> Result<CompletionResponse, VersoError>;

    /// Sends a plain prompt and returns generated tokens as they arrive.
    ///
    /// The returned stream ends after the provider signals completion. A
    /// failure after the first chunk is yielded as an `Err` item.
    async fn stream_complete(&self, request: CompletionRequest)
    -> Result<ChunkStream, VersoError>;
}
