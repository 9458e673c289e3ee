// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across provider adapters and prompt methods.

use std::collections::BTreeMap;
use std::pin::Pin;

use futures_core::Stream;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::VersoError;

/// Caller-supplied template variables, keyed by placeholder name.
pub type PromptInput = BTreeMap<String, String>;

/// A boxed stream of completion chunks as produced by a provider.
pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<StreamChunk, VersoError>> + Send>>;

/// Sampling temperature used by every prompt method.
///
/// Zero asks the provider for its highest-probability continuation.
pub const DETERMINISTIC_TEMPERATURE: f32 = 0.0;

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Author of a chat message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}

/// A request to a chat model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Model override. `None` uses the provider's configured chat model.
    pub model: Option<String>,
    /// Ordered conversation, typically a system instruction followed by user content.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
}

impl ChatRequest {
    /// Builds a deterministic (temperature zero) request for the given messages.
    pub fn deterministic(messages: Vec<ChatMessage>) -> Self {
        Self {
            model: None,
            messages,
            temperature: DETERMINISTIC_TEMPERATURE,
        }
    }
}

/// A request to a plain-text completion model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Model override. `None` uses the provider's configured completion model.
    pub model: Option<String>,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum tokens to generate. `None` uses the provider default.
    pub max_tokens: Option<u32>,
}

impl CompletionRequest {
    /// Builds a deterministic (temperature zero) request for the given prompt.
    pub fn deterministic(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            temperature: DETERMINISTIC_TEMPERATURE,
            max_tokens: None,
        }
    }
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The full result of a non-streaming provider call.
///
/// Serialises as the result mapping returned to callers: `text` always
/// present, provider metadata alongside.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResponse {
    /// Generated text.
    pub text: String,
    /// Provider-assigned response identifier.
    pub id: String,
    /// Model that produced the response.
    pub model: String,
    /// Why generation stopped (`stop`, `length`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Token usage, when reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
}

/// An incremental fragment of generated text from a streaming provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    /// Token text. May be empty for bookkeeping chunks.
    pub text: String,
    /// Set on the final chunk of a choice.
    pub finish_reason: Option<String>,
}

impl StreamChunk {
    pub fn token(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            finish_reason: None,
        }
    }
}
