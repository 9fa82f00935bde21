use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use log::warn;
use serde_json::json;

/// GET /health - component status
pub async fn health(State(state): State<AppState>) -> Response {
    let database = match ping(&state).await {
        Ok(()) => "operational",
        Err(_) => "unavailable",
    };

    let health = json!({
        "status": if database == "operational" { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "session_cache": state.guard.session_cache().len(),
            "revocations": state.guard.revocations().len(),
            "abuse_tracker": state.guard.abuse_tracker().len(),
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe. Not ready while the session store is unreachable.
pub async fn readiness(State(state): State<AppState>) -> Response {
    match ping(&state).await {
        Ok(()) => (StatusCode::OK, "Ready").into_response(),
        Err(e) => {
            warn!("Readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "Not ready").into_response()
        }
    }
}

/// GET /metrics - Prometheus exposition
pub async fn metrics(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
        .into_response()
}

async fn ping(state: &AppState) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(&state.pool).await.map(|_| ())
}
