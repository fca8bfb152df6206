//! Lightweight distributed tracing for the notification pipeline.
//!
//! A dispatch gets one trace; each traced step within it gets a span. The
//! active context lives in task-local storage (see [`context`]) and events
//! are exported to the telemetry collector on a fire-and-forget basis by
//! [`TelemetryClient`].

pub mod client;
pub mod context;
pub mod event;

pub use client::TelemetryClient;
pub use context::TraceContext;
pub use event::{EventKind, TelemetryEvent};
