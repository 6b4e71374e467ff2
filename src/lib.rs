//! # Data Centers Registry
//!
//! HTTP service for registering, querying and maintaining data-center
//! records. Reads are open; creates, updates and deletes require a bearer
//! token granting the configured write scope unless authorization is disabled.
//!
//! ## Modules
//!
//! - [`config`] - Environment-driven runtime configuration
//! - [`error`] - Central error type and its HTTP mapping
//! - [`handlers`] - HTTP request handlers for the public endpoints
//! - [`middleware`] - Scope-based authorization guard
//! - [`models`] - Records, filters, health state and shared application state
//! - [`services`] - Data-center stores, database monitor and token verification
//! - [`utils`] - Constants, validators and helpers

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::handlers::{
    SPEC_FILE, banner, create_data_center, delete_data_center, get_data_center, health_check,
    list_data_centers, openapi_spec, search_data_centers, swagger_ui, update_data_center,
};
use crate::middleware::{ScopeGuard, authorize};
use crate::models::AppState;
use crate::services::{DataCenterService, MemoryDataCenterService, PgDataCenterService};

/// Creates the Axum router with every application route.
///
/// Only the mutating data-center routes pass through [`authorize`]; reads,
/// health and documentation are always open.
pub fn app(state: Arc<AppState>) -> Router {
    let write_guard = ScopeGuard::new(
        Arc::clone(&state.authorization),
        [state.config.auth.write_scope.clone()],
    );

    let protected_routes = Router::new()
        .route(
            "/data-centers",
            post(create_data_center).put(update_data_center),
        )
        .route("/data-centers/{center_id}", delete(delete_data_center))
        .route("/data-centers/search", delete(delete_data_center))
        .route_layer(from_fn_with_state(write_guard, authorize));

    let public_routes = Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
        .route("/data-centers", get(list_data_centers))
        // "search" is not an id: other methods reach the id handlers and fail the id cast
        .route(
            "/data-centers/search",
            post(search_data_centers).get(get_data_center),
        )
        .route("/data-centers/{center_id}", get(get_data_center));

    let docs_path = &state.config.openapi_path;
    let docs_routes = Router::new()
        .route(&format!("{docs_path}/{SPEC_FILE}"), get(openapi_spec))
        .merge(swagger_ui(docs_path));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(docs_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Selects the data-center store described by `config`.
///
/// With `DATABASE_URL` set this connects to PostgreSQL and runs migrations;
/// otherwise records are kept in memory and lost on restart.
///
/// # Errors
///
/// Returns [`sqlx::Error`] if the database cannot be reached or migrated.
pub async fn build_service(config: &AppConfig) -> Result<Arc<dyn DataCenterService>, sqlx::Error> {
    match &config.database_url {
        Some(url) => {
            info!("Using PostgreSQL data center store");
            let service = PgDataCenterService::connect(url, config.db_pool_max).await?;
            Ok(Arc::new(service))
        }
        None => {
            warn!("DATABASE_URL is not set, using in-memory data center store");
            Ok(Arc::new(MemoryDataCenterService::new()))
        }
    }
}
