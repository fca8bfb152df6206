pub mod health;
pub mod notifications;

use axum::Router;
use axum::middleware::from_fn_with_state;

use crate::middleware::trace::trace_requests;
use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::router())
        .merge(notifications::router())
        .layer(from_fn_with_state(state.clone(), trace_requests))
        .with_state(state)
}
