// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Method descriptor, handler trait and execution output.
//!
//! A [`MethodDescriptor`] pairs an HTTP route with a [`MethodHandler`]. The
//! descriptor is plain data once built; the dispatcher reads the route and
//! verb, and invokes [`MethodDescriptor::execute`] with the request body.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};
use tracing::debug;
use verso_core::{CompletionResponse, PromptInput, VersoError};

use crate::relay::TokenStream;

/// HTTP verb a method is mounted under.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Result of a method invocation.
#[derive(Debug)]
pub enum MethodOutput {
    /// A single completion, returned once the provider has finished.
    Completion(CompletionResponse),
    /// A live token stream; the provider call runs while the caller reads.
    Stream(TokenStream),
}

impl MethodOutput {
    /// Returns the completion, or `None` for streaming output.
    pub fn into_completion(self) -> Option<CompletionResponse> {
        match self {
            Self::Completion(response) => Some(response),
            Self::Stream(_) => None,
        }
    }

    /// Returns the token stream, or `None` for a completed response.
    pub fn into_stream(self) -> Option<TokenStream> {
        match self {
            Self::Stream(stream) => Some(stream),
            Self::Completion(_) => None,
        }
    }
}

/// Executable body of a prompt method.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Binds `input`, calls the provider and returns its output.
    async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError>;
}

/// One prompt method: identity, HTTP surface, declared inputs and handler.
#[derive(Clone, Serialize)]
pub struct MethodDescriptor {
    pub id: &'static str,
    pub route: &'static str,
    pub verb: Verb,
    pub description: &'static str,
    pub input_variables: &'static [&'static str],
    /// True when the method answers with a token stream.
    pub streaming: bool,
    #[serde(skip_serializing)]
    handler: Arc<dyn MethodHandler>,
}

impl MethodDescriptor {
    pub fn new(
        id: &'static str,
        route: &'static str,
        verb: Verb,
        description: &'static str,
        input_variables: &'static [&'static str],
        streaming: bool,
        handler: Arc<dyn MethodHandler>,
    ) -> Self {
        Self {
            id,
            route,
            verb,
            description,
            input_variables,
            streaming,
            handler,
        }
    }

    /// Runs the handler for one invocation.
    pub async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
        debug!(method = self.id, inputs = input.len(), "executing method");
        self.handler.execute(input).await
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("id", &self.id)
            .field("route", &self.route)
            .field("verb", &self.verb)
            .field("input_variables", &self.input_variables)
            .field("streaming", &self.streaming)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    struct Echo;

    #[async_trait]
    impl MethodHandler for Echo {
        async fn execute(&self, input: PromptInput) -> Result<MethodOutput, VersoError> {
            Ok(MethodOutput::Completion(CompletionResponse {
                text: input.values().cloned().collect::<Vec<_>>().join(","),
                id: "echo".into(),
                model: "echo".into(),
                finish_reason: None,
                usage: None,
            }))
        }
    }

    #[test]
    fn verb_renders_uppercase_and_parses_any_case() {
        assert_eq!(Verb::Post.to_string(), "POST");
        assert_eq!(Verb::from_str("post").unwrap(), Verb::Post);
        assert_eq!(Verb::Delete.as_ref(), "DELETE");
        assert!(Verb::from_str("TRACE").is_err());
    }

    #[test]
    fn descriptor_serializes_without_handler() {
        let descriptor = MethodDescriptor::new(
            "echo",
            "/echo",
            Verb::Post,
            "Echoes",
            &["a"],
            false,
            Arc::new(Echo),
        );
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["id"], "echo");
        assert_eq!(json["verb"], "POST");
        assert_eq!(json["input_variables"][0], "a");
        assert!(json.get("handler").is_none());
        assert!(format!("{descriptor:?}").contains("/echo"));
    }

    #[tokio::test]
    async fn execute_delegates_to_handler() {
        let descriptor =
            MethodDescriptor::new("echo", "/echo", Verb::Post, "", &[], false, Arc::new(Echo));
        let mut input = PromptInput::new();
        input.insert("a".into(), "x".into());
        let output = descriptor.execute(input).await.unwrap();
        assert_eq!(output.into_completion().unwrap().text, "x");
    }
}
