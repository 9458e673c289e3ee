// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `poem`: streams a very short poem about the caller's topic.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use verso_core::{CompletionProvider, CompletionRequest, PromptInput, PromptTemplate, VersoError};

use crate::binding::{Strictness, bind, template_variables};
use crate::descriptor::{MethodDescriptor, MethodHandler, MethodOutput, Verb};
use crate::relay::relay;

pub const ID: &str = "poem";
pub const INPUT_VARIABLES: &[&str] = &["Topic"];

/// Bound input of `poem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoemRequest {
    #[serde(rename = "Topic")]
    pub topic: String,
}

pub fn prompt() -> Result<PromptTemplate, VersoError> {
    PromptTemplate::new("Write me very short a poem about {Topic}.")
}

struct PoemMethod {
    provider: Arc<dyn CompletionProvider>,
    stream_buffer: usize,
}

#[async_trait]
impl MethodHandler for PoemMethod {
    async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
        let request: PoemRequest = bind(ID, INPUT_VARIABLES, input, Strictness::Exact)?;
        let prompt = prompt()?.format(&template_variables(&request)?)?;
        // Errors before the first chunk (auth, rate limit) fail the call itself.
        let chunks = self
            .provider
            .stream_complete(CompletionRequest::deterministic(prompt))
            .await?;
        debug!(topic = %request.topic, "poem stream started");
        Ok(MethodOutput::Stream(relay(chunks, self.stream_buffer)))
    }
}

pub fn descriptor(provider: Arc<dyn CompletionProvider>, stream_buffer: usize) -> MethodDescriptor {
    MethodDescriptor::new(
        ID,
        "/poem",
        Verb::Post,
        "Generates a short poem about your topic (Use as stream)",
        INPUT_VARIABLES,
        true,
        Arc::new(PoemMethod {
            provider,
            stream_buffer,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_topic() {
        let vars = template_variables(&PoemRequest {
            topic: "autumn leaves".into(),
        })
        .unwrap();
        assert_eq!(
            prompt().unwrap().format(&vars).unwrap(),
            "Write me very short a poem about autumn leaves."
        );
    }
}
