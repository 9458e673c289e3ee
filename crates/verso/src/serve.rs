// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `verso serve`: wires the provider, method registry and gateway together.

use std::sync::Arc;

use tracing::{error, info};
use verso_config::VersoConfig;
use verso_core::{CompletionProvider, PluginAdapter, VersoError};
use verso_gateway::{GatewayConfig, GatewayState};
use verso_methods::MethodRegistry;
use verso_openai::OpenAiProvider;

use crate::shutdown;

/// Runs the gateway until SIGINT or SIGTERM.
pub async fn run_serve(config: VersoConfig) -> Result<(), VersoError> {
    init_tracing(&config.server.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = config.server.host,
        port = config.server.port,
        "starting verso"
    );

    let provider = Arc::new(OpenAiProvider::new(&config.openai).inspect_err(|e| {
        error!(error = %e, "failed to initialize provider");
    })?);
    let shared: Arc<dyn CompletionProvider> = provider.clone();
    let registry = MethodRegistry::builtin(Arc::clone(&shared), config.server.stream_buffer);
    for method in &registry {
        info!(method = method.id, route = method.route, verb = %method.verb, "method registered");
    }

    let cancel = shutdown::install_signal_handler();
    let gateway = GatewayConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let result =
        verso_gateway::start_server(&gateway, GatewayState::new(registry, shared), cancel).await;

    if let Err(e) = provider.shutdown().await {
        error!(error = %e, "provider shutdown failed");
    }
    info!("verso stopped");
    result
}

/// Initializes the tracing subscriber with the given log level.
///
/// `RUST_LOG` takes precedence when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("verso={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
