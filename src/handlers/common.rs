//! Greeting, liveness and readiness.

use crate::response::success_ok;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadyBody {
    status: &'static str,
    store: &'static str,
}

/// GET /
pub async fn greeting() -> impl IntoResponse {
    success_ok("hello world")
}

/// GET /health
pub async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

/// GET /ready
pub async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.users.ping().await {
        tracing::warn!(error = %e, "store not ready");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                store: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        store: "ok",
    }))
}
