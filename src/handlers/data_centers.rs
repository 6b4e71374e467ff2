//! # Data Center Handlers
//!
//! One handler per `/data-centers` route. Each shapes its input, calls exactly
//! one [`crate::services::DataCenterService`] operation and maps the result to
//! a status code. Failures, including malformed bodies and query strings, are
//! returned as [`crate::error::AppError`] and rendered by its `IntoResponse` implementation.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::Value;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{AppState, DataCenter, DataCenterPayload, FilterParams, QueryFilters};

/// Parses a path id; malformed or unextractable ids surface as
/// [`crate::error::AppError::Cast`].
fn parse_id(path: Result<Path<String>, PathRejection>) -> AppResult<Uuid> {
    let Path(raw) = path?;
    Ok(Uuid::parse_str(&raw)?)
}

/// Gets a single data center.
///
/// GET /data-centers/{centerId}
///
/// # Returns
///
/// - `200 OK` with the record
/// - `404 Not Found` - unknown id, or an id that is not a valid identifier
#[instrument(skip(state), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn get_data_center(
    State(state): State<Arc<AppState>>,
    center_id: Result<Path<String>, PathRejection>,
) -> AppResult<Json<DataCenter>> {
    let id = parse_id(center_id)?;
    let record = state.service.by_id(id).await?;
    Ok(Json(record))
}

/// Runs an advanced search.
///
/// POST /data-centers/search {query object}
///
/// Returns the records whose document contains the posted object.
///
/// # Returns
///
/// - `200 OK` with matching records
/// - `400 Bad Request` - body is not a JSON object
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn search_data_centers(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Vec<DataCenter>>> {
    let Json(query) = payload?;
    debug!(?query, "Processing advanced search");
    let records = state.service.search(query).await?;
    Ok(Json(records))
}

/// Lists data centers matching the query-string filters.
///
/// GET /data-centers ?country=CA,US&name=..&centerId=..&type=..
///
/// Each parameter is a comma-separated list; an absent parameter places no
/// constraint on its field. The service is always consulted, even when every
/// filter is empty.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn list_data_centers(
    State(state): State<Arc<AppState>>,
    params: Result<Query<FilterParams>, QueryRejection>,
) -> AppResult<Json<Vec<DataCenter>>> {
    let Query(params) = params?;
    let filters = QueryFilters::from(params);
    debug!(?filters, "Listing data centers");
    let records = state.service.list(&filters).await?;
    Ok(Json(records))
}

/// Registers a data center.
///
/// POST /data-centers DataCenterPayload
///
/// # Returns
///
/// - `201 Created` with the stored record
/// - `400 Bad Request` - malformed or invalid payload
/// - `409 Conflict` - `centerId` already registered
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn create_data_center(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DataCenterPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let record = state.service.create(payload).await?;
    info!(id = %record.id, center_id = %record.center_id(), "Data center registered");
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replaces a data center's attributes.
///
/// PUT /data-centers DataCenterPayload (with `id`)
///
/// # Returns
///
/// - `200 OK` with the updated record
/// - `400 Bad Request` - malformed payload or missing `id`
/// - `404 Not Found` - unknown `id`
/// - `409 Conflict` - `centerId` owned by another record
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn update_data_center(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<DataCenterPayload>, JsonRejection>,
) -> AppResult<Json<DataCenter>> {
    let Json(payload) = payload?;
    let record = state.service.update(payload).await?;
    info!(id = %record.id, "Data center updated");
    Ok(Json(record))
}

/// Removes a data center.
///
/// DELETE /data-centers/{centerId}
///
/// # Returns
///
/// - `204 No Content`
/// - `404 Not Found` - unknown or malformed id
#[instrument(skip(state), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn delete_data_center(
    State(state): State<Arc<AppState>>,
    center_id: Result<Path<String>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = parse_id(center_id)?;
    state.service.delete(id).await?;
    info!(%id, "Data center deleted");
    Ok(StatusCode::NO_CONTENT)
}
