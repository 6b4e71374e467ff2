//! # Authorization Middleware
//!
//! Guards the mutating data-center routes. When authorization is enabled the
//! request must carry a bearer token granting every required scope; when it
//! is disabled the guard only logs a warning and lets the request through.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::{debug, instrument, trace, warn};

use crate::error::{AppError, AppResult};
use crate::services::jwt::Authorization;

/// Middleware state: the authorization mode plus the scopes a route requires.
#[derive(Clone)]
pub struct ScopeGuard {
    authorization: Arc<Authorization>,
    required_scopes: Arc<[String]>,
}

impl ScopeGuard {
    /// Creates a guard requiring all of `scopes`.
    pub fn new<I, S>(authorization: Arc<Authorization>, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            authorization,
            required_scopes: scopes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required_scopes(&self) -> &[String] {
        &self.required_scopes
    }
}

/// Authorization middleware for protecting routes
///
/// # Authorization Flow
///
/// 1. Extracts `Authorization` header with `Bearer <token>` format
/// 2. Validates the token signature and expiration
/// 3. Checks that the token grants every required scope
/// 4. Adds the verified [`crate::services::jwt::Claims`] to request extensions
///
/// # Returns
///
/// - **Success**: Continues to next handler
/// - **Failure**: `401 Unauthorized` for missing/invalid tokens, `403 Forbidden`
///   for tokens lacking a required scope
///
/// # Usage
///
/// ```rust,ignore
/// Router::new()
///     .route("/protected", post(handler))
///     .route_layer(middleware::from_fn_with_state(guard, authorize))
/// ```
#[instrument(
    skip_all,
    fields(
        method = %req.method(),
        uri = %req.uri(),
        request_id = %uuid::Uuid::new_v4()
    )
)]
pub async fn authorize(
    State(guard): State<ScopeGuard>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let verifier = match guard.authorization.as_ref() {
        Authorization::Enabled(verifier) => verifier,
        Authorization::Disabled => {
            warn!("calling protected endpoint without auth enabled");
            return Ok(next.run(req).await);
        }
    };

    trace!("Processing authorization middleware");

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok());

    let Some(auth_header) = auth_header else {
        warn!("Missing Authorization header");
        return Err(AppError::Unauthorized(
            "Missing Authorization header".to_string(),
        ));
    };

    let token = auth_header
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token);

    let Some(token) = token else {
        warn!("Invalid Authorization header format");
        return Err(AppError::Unauthorized(
            "Authorization header must use the Bearer scheme".to_string(),
        ));
    };

    let claims = verifier.verify(token.trim()).await?;

    let missing = claims.missing_scopes(guard.required_scopes());
    if !missing.is_empty() {
        warn!(?missing, sub = ?claims.sub, "Token lacks required scopes");
        return Err(AppError::Forbidden(format!(
            "missing required scopes: {}",
            missing.join(", ")
        )));
    }

    debug!(sub = ?claims.sub, "Authorization successful");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
