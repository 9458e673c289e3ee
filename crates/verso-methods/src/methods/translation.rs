// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Translation methods: `chat-translation` (chat model) and `translation`
//! (plain completion model). Both take the same three variables.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use verso_core::{
    ChatPromptTemplate, ChatRequest, CompletionProvider, CompletionRequest, MessageTemplate,
    PromptInput, PromptTemplate, VersoError,
};

use crate::binding::{Strictness, bind, template_variables};
use crate::descriptor::{MethodDescriptor, MethodHandler, MethodOutput, Verb};

pub const CHAT_ID: &str = "chat-translation";
pub const COMPLETION_ID: &str = "translation";
pub const INPUT_VARIABLES: &[&str] = &["Input Language", "Output Language", "Text"];

/// Bound input of both translation methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    #[serde(rename = "Input Language")]
    pub input_language: String,
    #[serde(rename = "Output Language")]
    pub output_language: String,
    #[serde(rename = "Text")]
    pub text: String,
}

pub fn chat_prompt() -> Result<ChatPromptTemplate, VersoError> {
    Ok(ChatPromptTemplate::from_messages(vec![
        MessageTemplate::system(
            "You are a helpful assistant that translates {Input Language} to {Output Language}.",
        )?,
        MessageTemplate::human("{Text}")?,
    ]))
}

pub fn completion_prompt() -> Result<PromptTemplate, VersoError> {
    PromptTemplate::new(
        "Translate the following text from {Input Language} to {Output Language}\n```{Text}```\n\n",
    )
}

struct ChatTranslation {
    provider: Arc<dyn CompletionProvider>,
}

#[async_trait]
impl MethodHandler for ChatTranslation {
    async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
        let request: TranslationRequest =
            bind(CHAT_ID, INPUT_VARIABLES, input, Strictness::Lenient)?;
        let messages = chat_prompt()?.format_messages(&template_variables(&request)?)?;
        let response = self
            .provider
            .chat(ChatRequest::deterministic(messages))
            .await?;
        Ok(MethodOutput::Completion(response))
    }
}

struct CompletionTranslation {
    provider: Arc<dyn CompletionProvider>,
}

#[async_trait]
impl MethodHandler for CompletionTranslation {
    async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
        let request: TranslationRequest =
            bind(COMPLETION_ID, INPUT_VARIABLES, input, Strictness::Exact)?;
        let prompt = completion_prompt()?.format(&template_variables(&request)?)?;
        let response = self
            .provider
            .complete(CompletionRequest::deterministic(prompt))
            .await?;
        Ok(MethodOutput::Completion(response))
    }
}

pub fn chat_descriptor(provider: Arc<dyn CompletionProvider>) -> MethodDescriptor {
    MethodDescriptor::new(
        CHAT_ID,
        "/chat-translate",
        Verb::Post,
        "Translates a text from one language to another using a chat model.",
        INPUT_VARIABLES,
        false,
        Arc::new(ChatTranslation { provider }),
    )
}

pub fn completion_descriptor(provider: Arc<dyn CompletionProvider>) -> MethodDescriptor {
    MethodDescriptor::new(
        COMPLETION_ID,
        "/translate",
        Verb::Post,
        "Translates a text from one language to another",
        INPUT_VARIABLES,
        false,
        Arc::new(CompletionTranslation { provider }),
    )
}
