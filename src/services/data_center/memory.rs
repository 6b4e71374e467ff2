use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, instrument};
use uuid::Uuid;
use validator::Validate;

use super::{DataCenterService, center_id_taken, not_found, require_object, update_target};
use crate::error::{AppError, AppResult};
use crate::models::{DataCenter, DataCenterPayload, QueryFilters};
use crate::utils::json;

/// Process-local data-center store.
///
/// Records live in a [`DashMap`] keyed by id, with a second map from
/// `centerId` to id enforcing uniqueness. Reads go straight to the maps;
/// writers hold `writer` for the whole read-check-write so both maps change
/// together.
#[derive(Debug, Default)]
pub struct MemoryDataCenterService {
    records: DashMap<Uuid, DataCenter>,
    center_ids: DashMap<String, Uuid>,
    writer: Mutex<()>,
}

impl MemoryDataCenterService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn write_lock(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sorted(mut records: Vec<DataCenter>) -> Vec<DataCenter> {
        records.sort_by(|a, b| a.center_id().cmp(b.center_id()));
        records
    }
}

#[async_trait]
impl DataCenterService for MemoryDataCenterService {
    #[instrument(skip(self))]
    async fn by_id(&self, id: Uuid) -> AppResult<DataCenter> {
        self.records
            .get(&id)
            .map(|record| record.clone())
            .ok_or_else(|| not_found(id))
    }

    #[instrument(skip_all)]
    async fn search(&self, query: Value) -> AppResult<Vec<DataCenter>> {
        require_object(&query)?;

        let mut matches = Vec::new();
        for record in self.records.iter() {
            let document = serde_json::to_value(record.value()).map_err(|e| {
                AppError::Unclassified {
                    name: "SerializationError".to_string(),
                    message: e.to_string(),
                }
            })?;
            if json::contains(&document, &query) {
                matches.push(record.value().clone());
            }
        }

        debug!(count = matches.len(), "Search completed");
        Ok(Self::sorted(matches))
    }

    #[instrument(skip(self))]
    async fn list(&self, filters: &QueryFilters) -> AppResult<Vec<DataCenter>> {
        let matches: Vec<DataCenter> = self
            .records
            .iter()
            .filter(|record| record.matches(filters))
            .map(|record| record.value().clone())
            .collect();

        debug!(count = matches.len(), "Listing completed");
        Ok(Self::sorted(matches))
    }

    #[instrument(skip_all, fields(center_id = %payload.fields.center_id))]
    async fn create(&self, payload: DataCenterPayload) -> AppResult<DataCenter> {
        payload.validate()?;

        let record = DataCenter::create(payload.fields);

        let _writer = self.write_lock();
        if self.center_ids.contains_key(record.center_id()) {
            return Err(center_id_taken(record.center_id()));
        }
        self.center_ids
            .insert(record.center_id().to_string(), record.id);
        self.records.insert(record.id, record.clone());

        debug!(id = %record.id, "Data center created");
        Ok(record)
    }

    #[instrument(skip_all, fields(id = ?payload.id))]
    async fn update(&self, payload: DataCenterPayload) -> AppResult<DataCenter> {
        payload.validate()?;
        let id = update_target(&payload)?;

        let _writer = self.write_lock();
        let existing = self
            .records
            .get(&id)
            .map(|record| record.clone())
            .ok_or_else(|| not_found(id))?;
        let updated = existing.replaced_with(payload.fields);

        if updated.center_id() != existing.center_id() {
            if self.center_ids.contains_key(updated.center_id()) {
                return Err(center_id_taken(updated.center_id()));
            }
            self.center_ids.remove(existing.center_id());
            self.center_ids
                .insert(updated.center_id().to_string(), id);
        }

        self.records.insert(id, updated.clone());
        debug!("Data center updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let _writer = self.write_lock();
        let (_, removed) = self.records.remove(&id).ok_or_else(|| not_found(id))?;
        self.center_ids.remove(removed.center_id());
        debug!("Data center deleted");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
