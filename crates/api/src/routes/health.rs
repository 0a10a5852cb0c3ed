use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use scribble_core::types::{self, Timestamp};
use scribble_db::repositories::DrawingRepo;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// `OK`, or `DEGRADED` when the database does not answer.
    pub status: &'static str,
    pub timestamp: String,
    pub message: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
    /// Number of stored drawings, when the database answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drawings: Option<i64>,
}

/// Service info returned at `/`.
#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
    pub timestamp: String,
    pub endpoints: Endpoints,
}

#[derive(Serialize)]
pub struct Endpoints {
    pub health: &'static str,
    pub drawings: &'static str,
    pub moderate: &'static str,
}

/// GET /health -- returns service and database health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = scribble_db::health_check(&state.pool).await.is_ok();
    let drawings = if db_healthy {
        DrawingRepo::count(&state.pool).await.ok()
    } else {
        None
    };

    Json(HealthResponse {
        status: if db_healthy { "OK" } else { "DEGRADED" },
        timestamp: now(),
        message: "Drawing API is running",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        drawings,
    })
}

/// GET / -- describes the service and its entry points.
async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Drawing App API Server",
        status: "Running",
        timestamp: now(),
        endpoints: Endpoints {
            health: "/health",
            drawings: "/api/drawings",
            moderate: "/api/moderate",
        },
    })
}

fn now() -> String {
    let ts: Timestamp = types::now();
    types::to_iso(&ts)
}

/// Mount service info and health routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(service_info))
        .route("/health", get(health_check))
}
