//! # HTTP Request Handlers
//!
//! ## Available Handlers
//!
//! - **Data centers** (`data_centers`) - CRUD, filtered listing and advanced search
//! - **Docs** (`docs`) - OpenAPI document and Swagger UI
//! - **Health Check** (`health_check`) - Liveness banner and database health

mod data_centers;
mod docs;
mod health_check;

pub use data_centers::*;
pub use docs::*;
pub use health_check::*;
