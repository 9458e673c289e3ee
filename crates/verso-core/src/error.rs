// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by the Verso runtime crates.

use thiserror::Error;

/// The primary error type used across provider adapters, prompt methods and the gateway.
#[derive(Debug, Error)]
pub enum VersoError {
    /// Configuration errors (missing API key, invalid header values).
    #[error("configuration error: {0}")]
    Config(String),

    /// A variable declared by the method was not supplied by the caller.
    #[error("method `{method}` requires input variable `{variable}`")]
    MissingInput { method: String, variable: String },

    /// The caller supplied a variable the method does not declare.
    #[error("method `{method}` does not accept input variable `{variable}`")]
    UnexpectedInput { method: String, variable: String },

    /// Malformed prompt template or a placeholder with no bound value.
    #[error("template error: {0}")]
    Template(String),

    /// LLM provider errors (network failure, HTTP status, undecodable payload).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure after a token stream has been handed to the caller.
    #[error("stream error: {0}")]
    Stream(String),

    /// No method is registered under the requested identifier.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl VersoError {
    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Returns true when the error was caused by caller input rather than the system.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingInput { .. } | Self::UnexpectedInput { .. }
        )
    }
}
