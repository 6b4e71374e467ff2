//! # Application Constants
//!
//! Defaults for the configuration values read in [`crate::config`] and the
//! fixed strings served by the public endpoints.

use std::time::Duration;

/// Port the HTTP server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;

/// Mount point of the API documentation when `OPENAPI_PATH` is unset.
pub const DEFAULT_OPENAPI_PATH: &str = "/api-docs";

/// Scope a token must grant to create, update or delete data centers.
pub const DEFAULT_WRITE_SCOPE: &str = "DATA-CENTER.WRITE";

/// Maximum number of pooled PostgreSQL connections.
pub const DEFAULT_DB_POOL_MAX: u32 = 5;

/// How often the database monitor pings the store.
pub const DEFAULT_DB_MONITOR_INTERVAL: Duration = Duration::from_secs(30);

/// Body of `GET /`.
pub const BANNER: &str = "Data Centers Registry";

/// Reported as the commit in `/health` when `SVC_COMMIT_ID` is unset.
pub const UNKNOWN_COMMIT: &str = "unknown";
