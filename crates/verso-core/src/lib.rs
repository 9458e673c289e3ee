// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Verso.
//!
//! This crate provides the provider trait, the shared error type, prompt
//! templates, and the request/response types that flow between prompt
//! methods and completion providers.

pub mod error;
pub mod prompt;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::VersoError;
pub use prompt::{ChatPromptTemplate, MessageTemplate, PromptTemplate};
pub use traits::{CompletionProvider, PluginAdapter};
pub use types::{
    ChatMessage, ChatRequest, ChunkStream, CompletionRequest, CompletionResponse, HealthStatus,
    PromptInput, Role, StreamChunk, TokenUsage, DETERMINISTIC_TEMPERATURE,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_display_and_parse_round_trip() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).expect("should parse back"), role);
        }
        assert_eq!(Role::User.to_string(), "user");
    }

    #[test]
    fn role_serializes_lowercase() {
        let msg = ChatMessage::system("be brief");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "be brief");
    }

    #[test]
    fn deterministic_requests_use_zero_temperature() {
        let chat = ChatRequest::deterministic(vec![ChatMessage::user("hi")]);
        assert_eq!(chat.temperature, 0.0);
        assert!(chat.model.is_none());

        let completion = CompletionRequest::deterministic("hi");
        assert_eq!(completion.temperature, 0.0);
        assert!(completion.max_tokens.is_none());
    }

    #[test]
    fn completion_response_serializes_text_and_skips_empty_metadata() {
        let resp = CompletionResponse {
            text: "Bonjour".into(),
            id: "cmpl-1".into(),
            model: "gpt-3.5-turbo".into(),
            finish_reason: None,
            usage: None,
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["text"], "Bonjour");
        assert!(json.get("usage").is_none());
        assert!(json.get("finish_reason").is_none());
    }

    #[test]
    fn health_status_serializes_with_detail() {
        let json = serde_json::to_value(HealthStatus::Degraded("slow".into())).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["detail"], "slow");
    }

    #[test]
    fn input_errors_are_classified() {
        let missing = VersoError::MissingInput {
            method: "poem".into(),
            variable: "Topic".into(),
        };
        assert!(missing.is_input_error());
        assert!(missing.to_string().contains("Topic"));
        assert!(!VersoError::provider("boom").is_input_error());
    }
}
