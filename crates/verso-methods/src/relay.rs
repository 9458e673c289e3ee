// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider-to-caller token relay.
//!
//! [`relay`] spawns a producer task that pulls chunks from the provider and
//! pushes token text into a bounded channel; the caller holds the receiving
//! [`TokenStream`]. The producer owns the only sender, so the stream ends
//! whenever the task exits: after the last token, after a terminal error
//! item, or after the caller has gone away.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::StreamExt;
use tokio::sync::mpsc;
use tracing::{Instrument, debug, warn};
use verso_core::{ChunkStream, VersoError};

/// Consumer end of a relayed completion.
///
/// Yields token text in provider order. A failure after streaming began is
/// yielded once as an `Err`, after which the stream ends.
#[derive(Debug)]
pub struct TokenStream {
    rx: mpsc::Receiver<Result<String, VersoError>>,
}

impl TokenStream {
    /// Waits for the next token, `None` at end-of-stream.
    pub async fn recv(&mut self) -> Option<Result<String, VersoError>> {
        self.rx.recv().await
    }
}

impl futures_core::Stream for TokenStream {
    type Item = Result<String, VersoError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Starts relaying `source` and returns the consumer end immediately.
///
/// `buffer` bounds how many tokens may wait for a slow consumer before the
/// producer stops pulling from the provider. Must be called from within a
/// Tokio runtime.
pub fn relay(mut source: ChunkStream, buffer: usize) -> TokenStream {
    let (tx, rx) = mpsc::channel(buffer.max(1));

    let producer = async move {
        let mut forwarded = 0usize;
        loop {
            let item = tokio::select! {
                item = source.next() => item,
                () = tx.closed() => {
                    debug!(forwarded, "consumer dropped, abandoning provider stream");
                    return;
                }
            };

            match item {
                Some(Ok(chunk)) => {
                    // Finish markers and bookkeeping frames carry no text.
                    if chunk.text.is_empty() {
                        continue;
                    }
                    if tx.send(Ok(chunk.text)).await.is_err() {
                        debug!(forwarded, "consumer dropped, abandoning provider stream");
                        return;
                    }
                    forwarded += 1;
                }
                Some(Err(err)) => {
                    warn!(forwarded, error = %err, "provider stream failed mid-generation");
                    let _ = tx.send(Err(VersoError::Stream(err.to_string()))).await;
                    return;
                }
                None => {
                    debug!(forwarded, "provider stream finished");
                    return;
                }
            }
        }
    };
    tokio::spawn(producer.in_current_span());

    TokenStream { rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use verso_core::StreamChunk;

    fn source(items: Vec<Result<StreamChunk, VersoError>>) -> ChunkStream {
        Box::pin(stream::iter(items))
    }

    #[tokio::test]
    async fn forwards_tokens_in_order_and_skips_empty_chunks() {
        let tokens = relay(
            source(vec![
                Ok(StreamChunk::token("one")),
                Ok(StreamChunk::token("")),
                Ok(StreamChunk::token(" two")),
                Ok(StreamChunk {
                    text: String::new(),
                    finish_reason: Some("stop".into()),
                }),
            ]),
            4,
        );
        let out: Vec<String> = tokens.map(Result::unwrap).collect().await;
        assert_eq!(out, vec!["one", " two"]);
    }

    #[tokio::test]
    async fn error_is_terminal() {
        let mut tokens = relay(
            source(vec![
                Ok(StreamChunk::token("a")),
                Err(VersoError::provider("reset")),
                Ok(StreamChunk::token("never")),
            ]),
            4,
        );
        assert_eq!(tokens.recv().await.unwrap().unwrap(), "a");
        let err = tokens.recv().await.unwrap().unwrap_err();
        assert!(matches!(err, VersoError::Stream(ref m) if m.contains("reset")));
        assert!(tokens.recv().await.is_none());
    }

    #[tokio::test]
    async fn empty_source_closes_immediately() {
        let mut tokens = relay(source(vec![]), 1);
        assert!(tokens.recv().await.is_none());
    }

    #[tokio::test]
    async fn zero_buffer_is_clamped() {
        let tokens = relay(source(vec![Ok(StreamChunk::token("x"))]), 0);
        let out: Vec<_> = tokens.collect().await;
        assert_eq!(out.len(), 1);
    }
}
