//! Turnstile HTTP proxy (Axum).
//!
//! Forwards traffic to an upstream and intercepts conversation
//! payloads on watched calls, rewriting them to a reduced tree before
//! they reach the caller. Also exposes a small control API for the
//! viewer-side collaborators (status, settings, "load older").

pub mod error;
pub mod intercept;
pub mod rewrite;
pub mod routes;
pub mod state;
pub mod upstream;

use axum::Router;
use state::AppState;

/// Build the application router with all routes.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::control_routes())
        .fallback(routes::forward)
        .with_state(state)
}
