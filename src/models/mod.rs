mod data_center;
mod filters;
mod health;
mod state;

#[cfg(test)]
pub(crate) use data_center::fixtures;
pub use data_center::{DataCenter, DataCenterFields, DataCenterPayload};
pub use filters::{FilterParams, QueryFilters};
pub use health::{DbHealth, HealthState, Status, UnknownStatus};
pub use state::AppState;
