//! # Health Check Handlers
//!
//! `GET /` is a plain liveness banner. `GET /health` reports the database
//! status recorded by the monitor together with the service version, and
//! fails with `500` unless the database is known to be reachable.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::models::{AppState, DbHealth, Status};
use crate::utils::constant::BANNER;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub db: DbHealth,
    pub version: String,
}

/// GET /
#[instrument]
pub async fn banner() -> (StatusCode, &'static str) {
    debug!("Banner endpoint accessed");
    (StatusCode::OK, BANNER)
}

/// Reports database health and the service version.
///
/// GET /health
///
/// # Returns
///
/// - `200 OK` - database status is `OK`
/// - `500 Internal Server Error` - database status is `UNKNOWN` or `ERROR`
#[instrument(skip_all)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let db = state.health.get();
    debug!(status = %db.status, "Health check endpoint accessed");

    let status = if db.status == Status::Ok {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(HealthResponse {
            db,
            version: state.version(),
        }),
    )
}
