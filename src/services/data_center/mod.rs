//! # Data Center Service
//!
//! Data access for data-center records. Handlers depend only on the
//! [`DataCenterService`] trait; the binary picks an implementation from the
//! configuration.
//!
//! ## Implementations
//!
//! - [`MemoryDataCenterService`] - Process-local store for development and tests
//! - [`PgDataCenterService`] - PostgreSQL store with JSONB documents

mod memory;
mod postgres;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{DataCenter, DataCenterPayload, QueryFilters};

pub use memory::MemoryDataCenterService;
pub use postgres::PgDataCenterService;

/// Operations the HTTP layer needs from the registry store.
///
/// Every method reports failures as typed [`AppError`] variants:
/// `InvalidArgument` for payloads that fail validation, `NotFound` for unknown
/// ids, `StateConflict` when a `centerId` is already taken.
#[async_trait]
pub trait DataCenterService: Send + Sync {
    /// Looks up a single record by its id.
    async fn by_id(&self, id: Uuid) -> AppResult<DataCenter>;

    /// Returns records whose JSON document contains `query`.
    async fn search(&self, query: Value) -> AppResult<Vec<DataCenter>>;

    /// Returns records matching every non-empty filter set, ordered by `centerId`.
    async fn list(&self, filters: &QueryFilters) -> AppResult<Vec<DataCenter>>;

    async fn create(&self, payload: DataCenterPayload) -> AppResult<DataCenter>;

    async fn update(&self, payload: DataCenterPayload) -> AppResult<DataCenter>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> AppResult<()>;
}

pub(crate) fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("data center {id} not found"))
}

pub(crate) fn center_id_taken(center_id: &str) -> AppError {
    AppError::StateConflict(format!(
        "a data center with centerId {center_id} already exists"
    ))
}

/// The record id an update targets.
pub(crate) fn update_target(payload: &DataCenterPayload) -> AppResult<Uuid> {
    let raw = payload
        .id
        .as_deref()
        .ok_or_else(|| AppError::InvalidArgument("id is required for update".to_string()))?;
    Ok(Uuid::parse_str(raw)?)
}

pub(crate) fn require_object(query: &Value) -> AppResult<()> {
    if query.is_object() {
        Ok(())
    } else {
        Err(AppError::InvalidArgument(
            "search query must be a JSON object".to_string(),
        ))
    }
}
