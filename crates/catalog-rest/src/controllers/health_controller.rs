//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use catalog_core::HealthStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

const UP: &str = "UP";
const DOWN: &str = "DOWN";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `UP` or `DOWN`.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Per-dependency status, present on readiness checks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<BTreeMap<String, String>>,
}

impl HealthResponse {
    fn up() -> Self {
        Self {
            status: UP.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            checks: None,
        }
    }
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
        .route("/health/ready", get(readiness_check))
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::up())
}

/// Readiness check endpoint. Probes the database when one is configured.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "Service is not ready", body = HealthResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let Some(check) = state.readiness else {
        return (StatusCode::OK, Json(HealthResponse::up()));
    };

    let status = check.check().await;
    let detail = match &status {
        HealthStatus::Healthy => UP.to_string(),
        HealthStatus::Unhealthy(reason) => format!("{DOWN}: {reason}"),
    };

    let mut response = HealthResponse::up();
    response.checks = Some(BTreeMap::from([(check.name().to_string(), detail)]));

    if status.is_healthy() {
        (StatusCode::OK, Json(response))
    } else {
        response.status = DOWN.to_string();
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}
