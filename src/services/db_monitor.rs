//! # Database Monitor
//!
//! Background task that keeps the shared [`HealthState`] in sync with the
//! reachability of the data-center store.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::models::{HealthState, Status};
use crate::services::DataCenterService;

/// Pings the store once and records the outcome.
#[instrument(skip_all)]
pub async fn check_once(service: &dyn DataCenterService, health: &HealthState) -> Status {
    let previous = health.get().status;
    let status = match service.ping().await {
        Ok(()) => Status::Ok,
        Err(e) => {
            warn!(error = %e, "Database ping failed");
            Status::Error
        }
    };

    if status != previous {
        info!(from = %previous, to = %status, "Database status changed");
    }
    health.set(status);
    status
}

/// Spawns the monitor loop. The first check runs immediately.
pub fn spawn_db_monitor(
    service: Arc<dyn DataCenterService>,
    health: Arc<HealthState>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);
        loop {
            interval.tick().await;
            check_once(service.as_ref(), &health).await;
        }
    })
}
