//! # Database Health State
//!
//! Tri-state indicator of database connectivity. A single [`HealthState`] is
//! shared through the application state; the database monitor writes it and
//! the `/health` endpoint reads it.

use std::fmt;
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Connectivity status of the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Unknown,
    Error,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Unknown => "UNKNOWN",
            Status::Error => "ERROR",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognized health status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "OK" => Ok(Status::Ok),
            "UNKNOWN" => Ok(Status::Unknown),
            "ERROR" => Ok(Status::Error),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Snapshot of the database health as reported by `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbHealth {
    pub status: Status,
    /// Human-readable mirror of `status`; `"N/A"` until the first update.
    pub status_text: String,
}

impl Default for DbHealth {
    fn default() -> Self {
        Self {
            status: Status::Unknown,
            status_text: "N/A".to_string(),
        }
    }
}

/// Shared, synchronized holder for the database health.
#[derive(Debug, Default)]
pub struct HealthState {
    inner: RwLock<DbHealth>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the status and its text mirror.
    pub fn set(&self, status: Status) {
        let mut health = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if health.status != status {
            debug!(from = %health.status, to = %status, "Database health changed");
        }
        health.status = status;
        health.status_text = status.as_str().to_string();
    }

    pub fn get(&self) -> DbHealth {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_ok(&self) -> bool {
        self.get().status == Status::Ok
    }
}
