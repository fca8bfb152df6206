//! Per-request trace middleware.
//!
//! Installs a fresh task-local trace slot for every request, so concurrent
//! requests cannot observe each other's identifiers. Adopts upstream
//! `X-Trace-Id`/`X-Span-Id` headers when both are present; otherwise
//! starts a new trace. The trace is finished with the response status and
//! the slot cleared before the response leaves the middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use herald_telemetry::context;

use crate::state::AppState;

pub async fn trace_requests(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let upstream = upstream_ids(&request);

    context::scope(async move {
        let operation = format!("{} {}", method, path);

        match upstream {
            Some((trace_id, span_id)) => context::propagate(trace_id, span_id),
            None => {
                state
                    .telemetry
                    .start_trace(&operation, method.as_str(), &path, None);
            }
        }

        let response = next.run(request).await;

        let status = response.status();
        let error_message = if status.is_client_error() || status.is_server_error() {
            Some(status.canonical_reason().unwrap_or("request failed"))
        } else {
            None
        };
        state
            .telemetry
            .finish_trace(&operation, status.as_u16(), error_message);

        response
    })
    .await
}

/// Trace identifiers handed down by an upstream caller, if any.
fn upstream_ids(request: &Request) -> Option<(String, String)> {
    let trace_id = request.headers().get("x-trace-id")?.to_str().ok()?;
    let span_id = request.headers().get("x-span-id")?.to_str().ok()?;
    Some((trace_id.to_string(), span_id.to_string()))
}
