// SPDX-FileCopyrightText: 2026 Verso Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Method routes answer with the completion as JSON, or with the token
//! stream as a chunked `text/plain` body (SSE when the client asks for
//! `text/event-stream`). Errors are JSON `{"error": ...}` bodies.

use axum::{
    Json,
    body::Body,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use serde::Serialize;
use tracing::{Instrument, error, info, info_span, warn};
use verso_core::{HealthStatus, PromptInput, VersoError};
use verso_methods::{MethodDescriptor, MethodOutput, TokenStream};

use crate::server::GatewayState;
use crate::sse;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` or `unhealthy`.
    pub status: &'static str,
    /// Binary version.
    pub version: &'static str,
    /// Seconds since the gateway state was created.
    pub uptime_secs: u64,
    /// Health reported by the completion provider.
    pub provider: HealthStatus,
}

/// Response body for GET /methods.
#[derive(Debug, Serialize)]
pub struct MethodsResponse<'a> {
    pub methods: Vec<&'a MethodDescriptor>,
}

/// A [`VersoError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub VersoError);

impl From<VersoError> for ApiError {
    fn from(err: VersoError) -> Self {
        Self(err)
    }
}

/// HTTP status for each error kind.
pub fn status_for(err: &VersoError) -> StatusCode {
    match err {
        VersoError::MissingInput { .. } | VersoError::UnexpectedInput { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        VersoError::MethodNotFound(_) => StatusCode::NOT_FOUND,
        VersoError::Provider { .. } => StatusCode::BAD_GATEWAY,
        VersoError::Config(_)
        | VersoError::Template(_)
        | VersoError::Stream(_)
        | VersoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            error!(error = %self.0, status = status.as_u16(), "method failed");
        } else {
            warn!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        error_response(status, self.0.to_string())
    }
}

fn error_response(status: StatusCode, error: String) -> Response {
    (status, Json(ErrorResponse { error })).into_response()
}

fn wants_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/event-stream"))
}

/// Runs method `id` with the JSON body as its input.
pub async fn invoke_method(
    State(state): State<GatewayState>,
    id: &'static str,
    headers: HeaderMap,
    body: Result<Json<PromptInput>, JsonRejection>,
) -> Response {
    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let span = info_span!("method", method = id, request_id = %request_id);

    async move {
        let input = match body {
            Ok(Json(input)) => input,
            Err(rejection) => {
                warn!(error = %rejection, "invalid request body");
                return error_response(rejection.status(), rejection.body_text());
            }
        };

        let method = match state.registry.resolve(id) {
            Ok(method) => method,
            Err(err) => return ApiError(err).into_response(),
        };

        match method.execute(input).await {
            Ok(MethodOutput::Completion(response)) => {
                info!(chars = response.text.len(), "method completed");
                (StatusCode::OK, Json(response)).into_response()
            }
            Ok(MethodOutput::Stream(tokens)) => {
                info!(sse = wants_event_stream(&headers), "streaming method output");
                if wants_event_stream(&headers) {
                    sse::token_events(tokens).into_response()
                } else {
                    chunked_text(tokens)
                }
            }
            Err(err) => ApiError(err).into_response(),
        }
    }
    .instrument(span)
    .await
}

/// One body chunk per token. A mid-stream failure aborts the body.
fn chunked_text(tokens: TokenStream) -> Response {
    let body = Body::from_stream(
        tokens.inspect_err(|err| warn!(error = %err, "aborting chunked response")),
    );
    let mut response = Response::new(body);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    response
}

/// GET /health
///
/// Unauthenticated liveness probe including provider health.
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let provider = match state.provider.health_check().await {
        Ok(status) => status,
        Err(err) => HealthStatus::Unhealthy(err.to_string()),
    };
    let (code, status) = match &provider {
        HealthStatus::Healthy => (StatusCode::OK, "ok"),
        HealthStatus::Degraded(_) => (StatusCode::OK, "degraded"),
        HealthStatus::Unhealthy(_) => (StatusCode::SERVICE_UNAVAILABLE, "unhealthy"),
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
        provider,
    };
    (code, Json(body)).into_response()
}

/// GET /methods
pub async fn get_methods(State(state): State<GatewayState>) -> Response {
    let body = MethodsResponse {
        methods: state.registry.iter().collect(),
    };
    Json(body).into_response()
}

/// Fallback for paths no method is mounted at.
pub async fn not_found(uri: Uri) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        format!("no method is mounted at {}", uri.path()),
    )
}
