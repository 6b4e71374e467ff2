//! # API Documentation
//!
//! Serves the bundled OpenAPI document and a Swagger UI page that renders it.
//! Both are mounted under the configured `OPENAPI_PATH`.

use axum::{http::header, response::IntoResponse};
use tracing::{debug, instrument};
use utoipa_swagger_ui::{Config, SwaggerUi};

/// OpenAPI description of the registry API.
pub const OPENAPI_SPEC: &str = include_str!("../../resources/swagger.yaml");

/// File name of the OpenAPI document under the documentation mount.
pub const SPEC_FILE: &str = "swagger.yaml";

/// GET {OPENAPI_PATH}/swagger.yaml
#[instrument]
pub async fn openapi_spec() -> impl IntoResponse {
    debug!("OpenAPI document requested");
    ([(header::CONTENT_TYPE, "application/yaml")], OPENAPI_SPEC)
}

/// Swagger UI mounted at `mount`, rendering the bundled document.
///
/// The UI assets are compiled into the binary; the page loads the document
/// from [`openapi_spec`] under the same mount.
pub fn swagger_ui(mount: &str) -> SwaggerUi {
    SwaggerUi::new(mount.to_owned()).config(Config::new([spec_url(mount)]))
}

fn spec_url(mount: &str) -> String {
    format!("{mount}/{SPEC_FILE}")
}
