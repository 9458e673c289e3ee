// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests against a real listener.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use verso_core::CompletionProvider;
use verso_gateway::{GatewayState, serve};
use verso_methods::MethodRegistry;
use verso_test_utils::MockProvider;

async fn spawn_gateway(
    provider: MockProvider,
) -> (String, CancellationToken, tokio::task::JoinHandle<()>) {
    let provider: Arc<dyn CompletionProvider> = Arc::new(provider);
    let registry = MethodRegistry::builtin(Arc::clone(&provider), 2);
    let state = GatewayState::new(registry, provider);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    let handle = tokio::spawn(async move {
        serve(listener, state, token).await.unwrap();
    });
    (base, shutdown, handle)
}

#[tokio::test]
async fn poem_chunks_arrive_incrementally_over_http() {
    let provider = MockProvider::new()
        .with_stream_tokens(["Wind", " in", " the", " pines"])
        .with_token_delay(Duration::from_millis(20));
    let (base, shutdown, handle) = spawn_gateway(provider).await;

    let response = reqwest::Client::new()
        .post(format!("{base}/poem"))
        .json(&serde_json::json!({"Topic": "pines"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let mut chunks = Vec::new();
    let mut body = response.bytes_stream();
    while let Some(chunk) = body.next().await {
        chunks.push(String::from_utf8(chunk.unwrap().to_vec()).unwrap());
    }
    assert_eq!(chunks.concat(), "Wind in the pines");
    // Delayed tokens are flushed separately rather than buffered to the end.
    assert!(chunks.len() > 1, "got {chunks:?}");

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops after cancellation")
        .unwrap();
}

#[tokio::test]
async fn cancellation_stops_an_idle_server() {
    let (base, shutdown, handle) = spawn_gateway(MockProvider::new()).await;

    let health = reqwest::get(format!("{base}/health")).await.unwrap();
    assert!(health.status().is_success());
    drop(health);

    shutdown.cancel();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server stops after cancellation")
        .unwrap();

    assert!(reqwest::get(format!("{base}/health")).await.is_err());
}
