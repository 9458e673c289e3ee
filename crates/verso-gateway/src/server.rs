// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Mounts one route per registered method plus `/health` and `/methods`,
//! and serves until the shutdown token is cancelled.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    routing::{MethodFilter, get, on},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use verso_core::{CompletionProvider, PromptInput, VersoError};
use verso_methods::{MethodRegistry, Verb};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Methods served by this gateway.
    pub registry: Arc<MethodRegistry>,
    /// Provider behind the methods, probed by `/health`.
    pub provider: Arc<dyn CompletionProvider>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(registry: MethodRegistry, provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            registry: Arc::new(registry),
            provider,
            start_time: Instant::now(),
        }
    }
}

/// Gateway bind address (mirrors `[server]` from verso-config).
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

fn method_filter(verb: Verb) -> MethodFilter {
    match verb {
        Verb::Get => MethodFilter::GET,
        Verb::Post => MethodFilter::POST,
        Verb::Put => MethodFilter::PUT,
        Verb::Patch => MethodFilter::PATCH,
        Verb::Delete => MethodFilter::DELETE,
    }
}

/// Builds the application router for `state`.
///
/// Routes:
/// - one per registered method, at its route and verb
/// - GET /health
/// - GET /methods
pub fn build_router(state: GatewayState) -> Router {
    let mut methods: Router<GatewayState> = Router::new();
    for method in state.registry.iter() {
        let id = method.id;
        debug!(method = id, route = method.route, verb = %method.verb, "mounting method");
        methods = methods.route(
            method.route,
            on(
                method_filter(method.verb),
                move |state: State<GatewayState>,
                      headers: HeaderMap,
                      body: Result<Json<PromptInput>, JsonRejection>| async move {
                    handlers::invoke_method(state, id, headers, body).await
                },
            ),
        );
    }

    let public_routes: Router<GatewayState> = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/methods", get(handlers::get_methods));

    Router::new()
        .merge(public_routes)
        .merge(methods)
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}

/// Binds `config.host:config.port` and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), VersoError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| VersoError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;
    serve(listener, state, shutdown).await
}

/// Serves on an already-bound listener until `shutdown` is cancelled.
///
/// In-flight requests, including open token streams, are allowed to finish.
pub async fn serve(
    listener: TcpListener,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), VersoError> {
    let local = listener
        .local_addr()
        .map_err(|e| VersoError::Internal(format!("listener has no local address: {e}")))?;
    let methods = state.registry.len();
    let app = build_router(state);

    info!(addr = %local, methods, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| VersoError::Internal(format!("gateway server error: {e}")))?;

    info!("gateway stopped");
    Ok(())
}
