//! # Centralized Error Handling
//!
//! Every failure raised by a handler, an extractor, the authorization filter or
//! the data-access service ends up as an [`AppError`]. Its [`IntoResponse`]
//! implementation is the only place where error kinds are mapped to HTTP status
//! codes, so handlers simply propagate with `?` and never build error responses
//! themselves.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// Display name used for both missing records and unparseable identifiers.
pub const NOT_FOUND_NAME: &str = "Not found";

/// Message that replaces whatever the identifier parser reported.
pub const ID_NOT_FOUND_MESSAGE: &str = "Id not found";

/// Central application error type.
///
/// The variants form a closed set; status code selection is a single
/// exhaustive match in [`AppError::status_and_body`].
#[derive(Error, Debug)]
pub enum AppError {
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("state conflict: {0}")]
    StateConflict(String),

    /// An identifier could not be parsed into the store's id type.
    #[error("id cast error: {0}")]
    Cast(String),

    /// A failure the service layer reported without classifying it.
    #[error("{name}: {message}")]
    Unclassified { name: String, message: String },

    #[error("database error")]
    Db(#[from] sqlx::Error),

    #[error("signing key fetch failed")]
    KeyFetch(#[from] reqwest::Error),

    #[error("internal server error")]
    Internal,
}

/// JSON body sent with every non-2xx response.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Maps the error onto its status code and client-facing body.
    ///
    /// Infrastructure failures (database, key retrieval) are reported with a
    /// generic body; their details only go to the log.
    pub fn status_and_body(self) -> (StatusCode, ErrorBody) {
        let (status, error, message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "Unauthorized".into(), msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "Forbidden".into(), msg),
            AppError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, "InvalidArgument".into(), msg)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, NOT_FOUND_NAME.into(), msg),
            AppError::StateConflict(msg) => (StatusCode::CONFLICT, "StateConflict".into(), msg),
            AppError::Cast(_) => (
                StatusCode::NOT_FOUND,
                NOT_FOUND_NAME.into(),
                ID_NOT_FOUND_MESSAGE.into(),
            ),
            AppError::Unclassified { name, message } => {
                (StatusCode::INTERNAL_SERVER_ERROR, name, message)
            }
            AppError::Db(_) | AppError::KeyFetch(_) | AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "InternalError".into(),
                "Internal server error".into(),
            ),
        };

        (status, ErrorBody { error, message })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Db(e) => error!(?e, "Database error occurred"),
            AppError::KeyFetch(e) => error!(?e, "Failed to retrieve token verification key"),
            AppError::Unclassified { .. } | AppError::Internal => {
                error!(error = %self, "Unhandled error reached the error handler")
            }
            _ => warn!(error = %self, "Request failed"),
        }

        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::InvalidArgument(errors.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

impl From<uuid::Error> for AppError {
    fn from(e: uuid::Error) -> Self {
        AppError::Cast(e.to_string())
    }
}

/// A path segment that cannot even be extracted is an unusable id.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Cast(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidArgument(rejection.body_text())
    }
}

/// Convenience Result type alias that uses AppError as the error type.
pub type AppResult<T> = Result<T, AppError>;
