//! Task-local trace correlation state.
//!
//! Each unit of execution that handles a dispatch installs its own slot via
//! [`scope`], so concurrent dispatches never observe each other's
//! identifiers. Every accessor is a silent no-op when called outside a
//! scope — emitting telemetry must never be able to fail a dispatch.

use std::cell::RefCell;
use std::future::Future;
use std::time::Instant;

use uuid::Uuid;

tokio::task_local! {
    static ACTIVE_TRACE: RefCell<Option<TraceContext>>;
}

/// Correlation identifiers for one in-flight dispatch.
#[derive(Debug, Clone)]
pub struct TraceContext {
    pub trace_id: String,
    pub span_id: String,
    /// Absent when the context was adopted from an upstream caller.
    pub started_at: Option<Instant>,
}

/// Run `fut` with a fresh, empty trace slot for the current task.
pub async fn scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    ACTIVE_TRACE.scope(RefCell::new(None), fut).await
}

/// Mint a trace identifier: `trace_` + 32 lowercase hex characters.
pub fn new_trace_id() -> String {
    format!("trace_{}", Uuid::new_v4().simple())
}

/// Mint a span identifier: `span_` + 16 lowercase hex characters.
pub fn new_span_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("span_{}", &hex[..16])
}

/// Install a context for the current task, replacing any stale one.
pub fn set(ctx: TraceContext) {
    let _ = ACTIVE_TRACE.try_with(|slot| *slot.borrow_mut() = Some(ctx));
}

/// Remove and return the active context, if any.
pub fn take() -> Option<TraceContext> {
    ACTIVE_TRACE
        .try_with(|slot| slot.borrow_mut().take())
        .ok()
        .flatten()
}

/// Snapshot the active context, if any.
pub fn current() -> Option<TraceContext> {
    ACTIVE_TRACE
        .try_with(|slot| slot.borrow().clone())
        .ok()
        .flatten()
}

/// Adopt trace identifiers minted by an upstream caller.
///
/// No start time is recorded, so a later `finish_trace` will emit without
/// a duration.
pub fn propagate(trace_id: impl Into<String>, span_id: impl Into<String>) {
    set(TraceContext {
        trace_id: trace_id.into(),
        span_id: span_id.into(),
        started_at: None,
    });
}

/// Drop the active context.
pub fn clear() {
    let _ = ACTIVE_TRACE.try_with(|slot| *slot.borrow_mut() = None);
}
