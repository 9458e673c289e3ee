// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `verso methods`: prints the built-in method table without contacting a provider.

use std::sync::Arc;

use async_trait::async_trait;
use verso_core::{
    ChatRequest, ChunkStream, CompletionProvider, CompletionRequest, CompletionResponse,
    HealthStatus, PluginAdapter, VersoError,
};
use verso_methods::MethodRegistry;

/// Stand-in provider for building the registry when no API access is wanted.
struct Offline;

impl Offline {
    fn unavailable() -> VersoError {
        VersoError::Config("provider not configured".to_string())
    }
}

#[async_trait]
impl PluginAdapter for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn health_check(&self) -> Result<HealthStatus, VersoError> {
        Ok(HealthStatus::Unhealthy("provider not configured".to_string()))
    }

    async fn shutdown(&self) -> Result<(), VersoError> {
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for Offline {
    async fn chat(&self, _request: ChatRequest) -> Result<CompletionResponse, VersoError> {
        Err(Self::unavailable())
    }

    async fn complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<CompletionResponse, VersoError> {
        Err(Self::unavailable())
    }

    async fn stream_complete(
        &self,
        _request: CompletionRequest,
    ) -> Result<ChunkStream, VersoError> {
        Err(Self::unavailable())
    }
}

/// Renders one line per registered method.
pub fn method_table(stream_buffer: usize) -> String {
    let registry = MethodRegistry::builtin(Arc::new(Offline), stream_buffer);
    let mut out = String::new();
    for method in &registry {
        let mode = if method.streaming { "stream" } else { "json" };
        out.push_str(&format!(
            "{:<7}{:<18}{:<7}{}\n",
            method.verb.as_ref(),
            method.route,
            mode,
            method.input_variables.join(", ")
        ));
    }
    out
}
