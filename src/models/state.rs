use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::models::HealthState;
use crate::services::DataCenterService;
use crate::services::jwt::Authorization;

/// Application state shared across requests. Needs to be thread-safe.
pub struct AppState {
    /// Data-access service backing every `/data-centers` route.
    pub service: Arc<dyn DataCenterService>,
    /// Database health, written by the monitor and read by `/health`.
    pub health: Arc<HealthState>,
    /// Token verification for mutating routes, or the insecure pass-through.
    pub authorization: Arc<Authorization>,
    /// Configuration snapshot taken at startup.
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        service: Arc<dyn DataCenterService>,
        health: Arc<HealthState>,
        authorization: Authorization,
        config: AppConfig,
    ) -> Self {
        info!(
            auth_enabled = authorization.is_enabled(),
            openapi_path = %config.openapi_path,
            "Initializing application state"
        );

        Self {
            service,
            health,
            authorization: Arc::new(authorization),
            config,
        }
    }

    /// Version string reported by `/health`, `"<version> - <commit>"`.
    pub fn version(&self) -> String {
        format!(
            "{} - {}",
            self.config.service_version, self.config.service_commit_id
        )
    }
}
