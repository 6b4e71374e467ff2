use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;
use validator::Validate;

use super::{DataCenterService, center_id_taken, not_found, require_object, update_target};
use crate::error::{AppError, AppResult};
use crate::models::{DataCenter, DataCenterPayload, QueryFilters};

/// PostgreSQL-backed data-center store.
///
/// Each record is kept whole in a JSONB `document` column; `center_id` is
/// duplicated into its own column so the database enforces uniqueness.
#[derive(Debug, Clone)]
pub struct PgDataCenterService {
    db_pool: PgPool,
}

impl PgDataCenterService {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Connects to `database_url` and applies pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`sqlx::Error`] if the connection or a migration fails.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let db_pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&db_pool).await?;
        info!("Database migrations applied");

        Ok(Self::new(db_pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.db_pool
    }
}

/// Turns unique-key violations on `center_id` into conflicts.
fn map_write_error(e: sqlx::Error, center_id: &str) -> AppError {
    if e.as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
    {
        return center_id_taken(center_id);
    }
    error!(error = %e, "Failed to write data center");
    AppError::Db(e)
}

fn documents(rows: Vec<Json<DataCenter>>) -> Vec<DataCenter> {
    rows.into_iter().map(|Json(record)| record).collect()
}

#[async_trait]
impl DataCenterService for PgDataCenterService {
    #[instrument(skip(self))]
    async fn by_id(&self, id: Uuid) -> AppResult<DataCenter> {
        sqlx::query_scalar::<_, Json<DataCenter>>(
            "SELECT document FROM data_centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .map(|Json(record)| record)
        .ok_or_else(|| not_found(id))
    }

    #[instrument(skip_all)]
    async fn search(&self, query: Value) -> AppResult<Vec<DataCenter>> {
        require_object(&query)?;

        let rows = sqlx::query_scalar::<_, Json<DataCenter>>(
            "SELECT document FROM data_centers WHERE document @> $1 ORDER BY center_id",
        )
        .bind(Json(query))
        .fetch_all(&self.db_pool)
        .await?;

        debug!(count = rows.len(), "Search completed");
        Ok(documents(rows))
    }

    #[instrument(skip(self))]
    async fn list(&self, filters: &QueryFilters) -> AppResult<Vec<DataCenter>> {
        let rows = sqlx::query_scalar::<_, Json<DataCenter>>(
            r#"
            SELECT document FROM data_centers
            WHERE (cardinality($1::text[]) = 0 OR document->>'country' = ANY($1))
              AND (cardinality($2::text[]) = 0 OR document->>'name' = ANY($2))
              AND (cardinality($3::text[]) = 0 OR center_id = ANY($3))
              AND (cardinality($4::text[]) = 0 OR document->>'type' = ANY($4))
            ORDER BY center_id
            "#,
        )
        .bind(filters.country.as_slice())
        .bind(filters.name.as_slice())
        .bind(filters.center_id.as_slice())
        .bind(filters.center_type.as_slice())
        .fetch_all(&self.db_pool)
        .await?;

        debug!(count = rows.len(), "Listing completed");
        Ok(documents(rows))
    }

    #[instrument(skip_all, fields(center_id = %payload.fields.center_id))]
    async fn create(&self, payload: DataCenterPayload) -> AppResult<DataCenter> {
        payload.validate()?;
        let record = DataCenter::create(payload.fields);

        sqlx::query(
            r#"
            INSERT INTO data_centers (id, center_id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.center_id())
        .bind(Json(&record))
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| map_write_error(e, record.center_id()))?;

        debug!(id = %record.id, "Data center created");
        Ok(record)
    }

    #[instrument(skip_all, fields(id = ?payload.id))]
    async fn update(&self, payload: DataCenterPayload) -> AppResult<DataCenter> {
        payload.validate()?;
        let id = update_target(&payload)?;

        let existing = self.by_id(id).await?;
        let updated = existing.replaced_with(payload.fields);

        let result = sqlx::query(
            r#"
            UPDATE data_centers
            SET center_id = $2, document = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(updated.center_id())
        .bind(Json(&updated))
        .bind(updated.updated_at)
        .execute(&self.db_pool)
        .await
        .map_err(|e| map_write_error(e, updated.center_id()))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        debug!("Data center updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM data_centers WHERE id = $1")
            .bind(id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        debug!("Data center deleted");
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db_pool).await?;
        Ok(())
    }
}
