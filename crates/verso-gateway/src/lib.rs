// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for Verso prompt methods.
//!
//! Every method in the [`MethodRegistry`](verso_methods::MethodRegistry) is
//! mounted at its own route. The request body is the method's input
//! mapping; the response is the completion as JSON or a live token stream.

pub mod handlers;
pub mod server;
pub mod sse;

pub use handlers::{ApiError, ErrorResponse, HealthResponse, status_for};
pub use server::{GatewayConfig, GatewayState, build_router, serve, start_server};
