//! # Business Logic Services
//!
//! Services encapsulate data access and token verification behind interfaces
//! the HTTP handlers can use without knowing the backing implementation.
//!
//! ## Available Services
//!
//! - **Data centers** (`data_center`) - Registry store trait with in-memory and PostgreSQL backends
//! - **Database monitor** (`db_monitor`) - Periodic connectivity check feeding the health state
//! - **JWT** (`jwt`) - Bearer token verification and authorization mode

pub mod data_center;
pub mod db_monitor;
pub mod jwt;

pub use data_center::{DataCenterService, MemoryDataCenterService, PgDataCenterService};
