//! Fire-and-forget exporter for trace and log events.

use chrono::Utc;
use std::time::Instant;

use crate::context::{self, TraceContext};
use crate::event::{EventKind, TelemetryEvent};

/// Client for the external telemetry collector.
///
/// Every emission is spawned off and its outcome discarded: the collector
/// being slow or down must never block or fail a dispatch.
#[derive(Debug, Clone)]
pub struct TelemetryClient {
    http: reqwest::Client,
    endpoint: String,
    service_name: String,
}

impl TelemetryClient {
    pub fn new(base_url: impl Into<String>, service_name: impl Into<String>) -> Self {
        let base = base_url.into();
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/api/telemetry/events", base.trim_end_matches('/')),
            service_name: service_name.into(),
        }
    }

    /// Begin a new trace for a top-level operation.
    ///
    /// Mints fresh identifiers, installs them as the task's active context
    /// (silently replacing any stale one) and returns the trace identifier.
    pub fn start_trace(
        &self,
        operation: &str,
        method: &str,
        path: &str,
        user_id: Option<i64>,
    ) -> String {
        let trace_id = context::new_trace_id();
        let span_id = context::new_span_id();

        context::set(TraceContext {
            trace_id: trace_id.clone(),
            span_id: span_id.clone(),
            started_at: Some(Instant::now()),
        });

        self.emit(TelemetryEvent {
            trace_id: trace_id.clone(),
            span_id,
            parent_span_id: None,
            service_name: self.service_name.clone(),
            operation: operation.to_string(),
            event_type: EventKind::Span,
            timestamp: Utc::now(),
            status: "SUCCESS".to_string(),
            duration_ms: None,
            http_method: Some(method.to_string()),
            http_url: Some(path.to_string()),
            http_status_code: None,
            error_message: None,
            user_id: user_id.map(|id| id.to_string()),
            metadata: None,
        });

        trace_id
    }

    /// Complete the active trace and clear the context.
    ///
    /// Emits a span completion carrying the elapsed time when a start time
    /// was recorded. With no active trace this does nothing.
    pub fn finish_trace(&self, operation: &str, status_code: u16, error_message: Option<&str>) {
        let Some(ctx) = context::take() else {
            return;
        };

        let duration_ms = ctx
            .started_at
            .map(|started| started.elapsed().as_millis() as u64);
        let status = if status_code < 400 && error_message.is_none() {
            "SUCCESS"
        } else {
            "ERROR"
        };

        self.emit(TelemetryEvent {
            trace_id: ctx.trace_id,
            span_id: ctx.span_id,
            parent_span_id: None,
            service_name: self.service_name.clone(),
            operation: operation.to_string(),
            event_type: EventKind::Span,
            timestamp: Utc::now(),
            status: status.to_string(),
            duration_ms,
            http_method: None,
            http_url: None,
            http_status_code: Some(status_code),
            error_message: error_message.map(|m| m.to_string()),
            user_id: None,
            metadata: None,
        });
    }

    /// Record a call made to a downstream service within the active trace.
    ///
    /// The event is a child span of the current one; the active context is
    /// left untouched. With no active trace this does nothing.
    pub fn record_service_call(
        &self,
        service_name: &str,
        operation: &str,
        method: &str,
        path: &str,
        duration_ms: u64,
        status_code: u16,
    ) {
        let Some(ctx) = context::current() else {
            return;
        };

        let status = if status_code < 400 { "SUCCESS" } else { "ERROR" };

        self.emit(TelemetryEvent {
            trace_id: ctx.trace_id,
            span_id: context::new_span_id(),
            parent_span_id: Some(ctx.span_id),
            service_name: service_name.to_string(),
            operation: operation.to_string(),
            event_type: EventKind::Span,
            timestamp: Utc::now(),
            status: status.to_string(),
            duration_ms: Some(duration_ms),
            http_method: Some(method.to_string()),
            http_url: Some(path.to_string()),
            http_status_code: Some(status_code),
            error_message: None,
            user_id: None,
            metadata: None,
        });
    }

    /// Emit a log line tagged with the active trace and span.
    ///
    /// With no active trace this does nothing.
    pub fn log_event(&self, message: &str, level: &str) {
        let Some(ctx) = context::current() else {
            return;
        };

        self.emit(TelemetryEvent {
            trace_id: ctx.trace_id,
            span_id: ctx.span_id,
            parent_span_id: None,
            service_name: self.service_name.clone(),
            operation: "log".to_string(),
            event_type: EventKind::Log,
            timestamp: Utc::now(),
            status: level.to_string(),
            duration_ms: None,
            http_method: None,
            http_url: None,
            http_status_code: None,
            error_message: None,
            user_id: None,
            metadata: Some(serde_json::json!({ "message": message })),
        });
    }

    /// Post an event to the collector without waiting for the result.
    fn emit(&self, event: TelemetryEvent) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        tokio::spawn(async move {
            if let Err(err) = http.post(&endpoint).json(&event).send().await {
                tracing::debug!(error = %err, "Telemetry export failed");
            }
        });
    }
}
