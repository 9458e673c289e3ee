// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server-Sent Events rendering of a token stream.
//!
//! SSE event format:
//! ```text
//! event: token
//! data: {"text":"Crimson"}
//!
//! event: done
//! data: {}
//! ```
//!
//! A failure after streaming started is sent as a final `error` event
//! (`{"error": "..."}`) in place of `done`.

use std::convert::Infallible;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use verso_core::VersoError;
use verso_methods::TokenStream;

fn token_event(text: &str) -> Event {
    Event::default()
        .event("token")
        .data(serde_json::json!({ "text": text }).to_string())
}

fn done_event() -> Event {
    Event::default().event("done").data("{}")
}

fn error_event(err: &VersoError) -> Event {
    Event::default()
        .event("error")
        .data(serde_json::json!({ "error": err.to_string() }).to_string())
}

/// Renders `tokens` as `token` events followed by exactly one `done` or `error`.
pub fn token_events(
    tokens: TokenStream,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let events = stream::unfold(Some(tokens), |state| async move {
        let mut tokens = state?;
        let event = match tokens.next().await {
            Some(Ok(text)) => return Some((token_event(&text), Some(tokens))),
            Some(Err(err)) => error_event(&err),
            None => done_event(),
        };
        Some((event, None))
    })
    .map(Ok::<_, Infallible>);

    Sse::new(events).keep_alive(KeepAlive::default())
}
