//! Common routes: greeting, health, readiness.

use crate::handlers::{greeting, health, ready};
use crate::state::AppState;
use axum::{routing::get, Router};

/// GET /, GET /health, GET /ready.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
