// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SSE parser for streamed completions.
//!
//! The API sends one `data:` frame per chunk and a final `data: [DONE]`.
//! An in-band `{"error": ...}` frame is surfaced as a provider error.

use eventsource_stream::Eventsource;
use futures::future;
use futures::stream::StreamExt;
use tracing::debug;
use verso_core::{ChunkStream, StreamChunk, VersoError};

use crate::types::{ApiErrorResponse, TextCompletionResponse};

/// Terminal sentinel sent as the data of the last SSE frame.
const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug)]
enum Frame {
    Chunk(StreamChunk),
    Failed(VersoError),
    Done,
    Ignored,
}

/// Parses a streaming completion response into a stream of [`StreamChunk`]s.
///
/// The stream ends at `[DONE]` or when the connection closes, whichever
/// comes first. Frames with no text and no finish reason are dropped.
pub fn parse_completion_stream(response: reqwest::Response) -> ChunkStream {
    let frames = response
        .bytes_stream()
        .eventsource()
        .map(|result| match result {
            Ok(event) => parse_frame(&event.data),
            Err(e) => Frame::Failed(VersoError::provider(format!("SSE stream error: {e}"))),
        });

    let chunks = frames
        .take_while(|frame| future::ready(!matches!(frame, Frame::Done)))
        .filter_map(|frame| {
            future::ready(match frame {
                Frame::Chunk(chunk) => Some(Ok(chunk)),
                Frame::Failed(err) => Some(Err(err)),
                Frame::Done | Frame::Ignored => None,
            })
        });

    Box::pin(chunks)
}

fn parse_frame(data: &str) -> Frame {
    let data = data.trim();
    if data == DONE_SENTINEL {
        debug!("completion stream finished");
        return Frame::Done;
    }

    // Checked before the chunk shape, which accepts any JSON object.
    if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(data) {
        return Frame::Failed(VersoError::provider(api_err.error.to_string()));
    }

    match serde_json::from_str::<TextCompletionResponse>(data) {
        Ok(chunk) => match chunk.choices.into_iter().next() {
            Some(choice) if !choice.text.is_empty() || choice.finish_reason.is_some() => {
                Frame::Chunk(StreamChunk {
                    text: choice.text,
                    finish_reason: choice.finish_reason,
                })
            }
            _ => Frame::Ignored,
        },
        Err(parse_err) => Frame::Failed(VersoError::Provider {
            message: format!("failed to parse completion chunk: {parse_err}"),
            source: Some(Box::new(parse_err)),
        }),
    }
}
