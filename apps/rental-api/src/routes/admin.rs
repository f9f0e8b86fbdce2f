//! # Admin Routes
//!
//! Database reset (development only) and the liveness probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ApiResult;
use crate::state::AppState;

/// `GET /api/reset-db`
///
/// Drops every table and re-creates the empty schema.
pub async fn reset_db(State(state): State<AppState>) -> ApiResult<Json<&'static str>> {
    warn!("Resetting database on request");
    state.db.reset().await?;
    info!("Database reset");
    Ok(Json("Database reset successfully!"))
}

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    if state.db.health_check().await {
        (
            StatusCode::OK,
            Json(HealthStatus {
                status: "ok",
                database: true,
            }),
        )
    } else {
        warn!("Health check failed: database unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthStatus {
                status: "unavailable",
                database: false,
            }),
        )
    }
}
