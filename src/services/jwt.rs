//! # JWT Verification Service
//!
//! Verifies bearer tokens issued by an external identity provider and exposes
//! the scopes they grant. Tokens are never issued here.
//!
//! ## Key sources
//!
//! - A static key from configuration. A PEM-encoded RSA public key selects
//!   RS256; any other value is treated as an HMAC secret (HS256).
//! - A key URL returning the provider's PEM public key. The key is fetched on
//!   first use and cached for the lifetime of the process.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, trace, warn};

use crate::config::AuthConfig;
use crate::error::AppError;

/// Errors that can occur while verifying tokens
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid verification key: {0}")]
    InvalidKey(jsonwebtoken::errors::Error),
    #[error("Failed to fetch verification key: {0}")]
    KeyFetch(#[from] reqwest::Error),
    #[error("No verification key configured")]
    NoKeySource,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken | AuthError::TokenExpired => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::KeyFetch(e) => AppError::KeyFetch(e),
            AuthError::InvalidKey(_) | AuthError::NoKeySource => AppError::Internal,
        }
    }
}

/// Scopes nested under the provider-specific `context` claim.
#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct TokenContext {
    #[serde(default)]
    pub scope: Vec<String>,
}

/// JWT claims relevant to authorization
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user or application id)
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    #[serde(default)]
    pub iat: Option<u64>,
    #[serde(default)]
    pub scope: Vec<String>,
    #[serde(default)]
    pub context: TokenContext,
}

impl Claims {
    /// Scopes granted by the token; `context.scope` takes precedence.
    pub fn scopes(&self) -> &[String] {
        if self.context.scope.is_empty() {
            &self.scope
        } else {
            &self.context.scope
        }
    }

    /// Required scopes the token does not grant.
    pub fn missing_scopes<'a>(&self, required: &'a [String]) -> Vec<&'a str> {
        let granted = self.scopes();
        required
            .iter()
            .filter(|scope| !granted.contains(scope))
            .map(String::as_str)
            .collect()
    }
}

enum KeySource {
    Static {
        key: DecodingKey,
        algorithm: Algorithm,
    },
    Remote {
        url: String,
        client: reqwest::Client,
        cached: RwLock<Option<DecodingKey>>,
    },
}

/// Verifies token signatures and expiry against the configured key.
pub struct TokenVerifier {
    source: KeySource,
}

impl TokenVerifier {
    /// Creates a verifier from a static key.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidKey`] if a PEM key cannot be parsed.
    pub fn from_key(key: &str) -> Result<Self, AuthError> {
        let (key, algorithm) = if key.trim_start().starts_with("-----BEGIN") {
            let key = DecodingKey::from_rsa_pem(key.trim().as_bytes()).map_err(AuthError::InvalidKey)?;
            (key, Algorithm::RS256)
        } else {
            (DecodingKey::from_secret(key.as_bytes()), Algorithm::HS256)
        };

        Ok(Self {
            source: KeySource::Static { key, algorithm },
        })
    }

    /// Creates a verifier that fetches the RSA public key from `url`.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            source: KeySource::Remote {
                url: url.into(),
                client: reqwest::Client::new(),
                cached: RwLock::new(None),
            },
        }
    }

    async fn decoding_key(&self) -> Result<(DecodingKey, Algorithm), AuthError> {
        match &self.source {
            KeySource::Static { key, algorithm } => Ok((key.clone(), *algorithm)),
            KeySource::Remote {
                url,
                client,
                cached,
            } => {
                if let Some(key) = cached.read().await.as_ref() {
                    return Ok((key.clone(), Algorithm::RS256));
                }

                let mut slot = cached.write().await;
                if let Some(key) = slot.as_ref() {
                    return Ok((key.clone(), Algorithm::RS256));
                }

                debug!(%url, "Fetching token verification key");
                let pem = client
                    .get(url)
                    .send()
                    .await?
                    .error_for_status()?
                    .text()
                    .await?;
                let key =
                    DecodingKey::from_rsa_pem(pem.trim().as_bytes()).map_err(AuthError::InvalidKey)?;
                info!(%url, "Token verification key cached");
                *slot = Some(key.clone());
                Ok((key, Algorithm::RS256))
            }
        }
    }

    /// Validates a token and returns its claims.
    ///
    /// # Errors
    ///
    /// - [`AuthError::TokenExpired`] - Token has expired
    /// - [`AuthError::InvalidToken`] - Token is malformed or has an invalid signature
    /// - [`AuthError::KeyFetch`] - The remote key could not be retrieved
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        trace!("Validating bearer token");

        let (key, algorithm) = self.decoding_key().await?;
        match decode::<Claims>(token, &key, &Validation::new(algorithm)) {
            Ok(token_data) => {
                trace!(sub = ?token_data.claims.sub, "Bearer token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                debug!("Bearer token expired");
                Err(AuthError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid bearer token");
                Err(AuthError::InvalidToken)
            }
        }
    }
}

/// Authorization mode of the mutating routes.
pub enum Authorization {
    Enabled(TokenVerifier),
    /// Insecure mode for local development: every request is let through.
    Disabled,
}

impl Authorization {
    /// Builds the authorization mode described by `config`.
    ///
    /// A static key takes precedence over a key URL.
    pub fn from_config(config: &AuthConfig) -> Result<Self, AuthError> {
        if !config.enabled {
            warn!("Authorization is disabled, protected endpoints are open");
            return Ok(Authorization::Disabled);
        }

        let verifier = match (&config.jwt_key, &config.jwt_key_url) {
            (Some(key), _) => TokenVerifier::from_key(key)?,
            (None, Some(url)) => TokenVerifier::from_url(url.clone()),
            (None, None) => return Err(AuthError::NoKeySource),
        };
        Ok(Authorization::Enabled(verifier))
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Authorization::Enabled(_))
    }
}
