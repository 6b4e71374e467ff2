//! # Runtime Configuration
//!
//! All settings come from environment variables (a `.env` file is loaded by
//! the binary before this module runs). Parsing is done once at startup into
//! an immutable [`AppConfig`].
//!
//! ## Environment Variables
//!
//! - `PORT` - HTTP port (default `3000`)
//! - `OPENAPI_PATH` - documentation mount point (default `/api-docs`)
//! - `DATABASE_URL` - PostgreSQL connection string; unset selects the in-memory store
//! - `DB_POOL_MAX` - maximum pooled connections (default `5`)
//! - `DB_MONITOR_INTERVAL_SECS` - database ping interval (default `30`)
//! - `AUTH_ENABLED` - `true`/`false` (default `true`)
//! - `AUTH_JWT_KEY` / `AUTH_JWT_KEY_FILE` - token verification key, inline or from a file
//! - `AUTH_JWT_KEY_URL` - URL serving the PEM public key
//! - `AUTH_WRITE_SCOPE` - scope required by mutating routes (default `DATA-CENTER.WRITE`)
//! - `SVC_VERSION`, `SVC_COMMIT_ID` - reported by `/health`

use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::utils::constant::*;
use crate::utils::secret::resolve_secret;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    #[error("authorization is enabled but neither AUTH_JWT_KEY nor AUTH_JWT_KEY_URL is set")]
    MissingAuthKey,

    #[error("failed to read secret file: {0}")]
    SecretFile(#[from] std::io::Error),
}

/// Settings of the authorization filter.
#[derive(Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    /// Static verification key: a PEM RSA public key or an HMAC secret.
    pub jwt_key: Option<String>,
    /// Endpoint returning the PEM RSA public key.
    pub jwt_key_url: Option<String>,
    pub write_scope: String,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("enabled", &self.enabled)
            .field("jwt_key", &self.jwt_key.as_ref().map(|_| "****"))
            .field("jwt_key_url", &self.jwt_key_url)
            .field("write_scope", &self.write_scope)
            .finish()
    }
}

impl AuthConfig {
    /// Configuration for insecure mode: every protected request passes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            jwt_key: None,
            jwt_key_url: None,
            write_scope: DEFAULT_WRITE_SCOPE.to_string(),
        }
    }
}

/// Strongly typed application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub openapi_path: String,
    pub database_url: Option<String>,
    pub db_pool_max: u32,
    pub db_monitor_interval: Duration,
    pub auth: AuthConfig,
    pub service_version: String,
    pub service_commit_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_PORT,
            openapi_path: DEFAULT_OPENAPI_PATH.to_string(),
            database_url: None,
            db_pool_max: DEFAULT_DB_POOL_MAX,
            db_monitor_interval: DEFAULT_DB_MONITOR_INTERVAL,
            auth: AuthConfig::disabled(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            service_commit_id: UNKNOWN_COMMIT.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_port = parse_or("PORT", lookup("PORT"), defaults.server_port)?;
        let openapi_path = match lookup("OPENAPI_PATH") {
            Some(path) => normalize_mount_path(&path)?,
            None => defaults.openapi_path,
        };
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let db_pool_max = parse_or("DB_POOL_MAX", lookup("DB_POOL_MAX"), defaults.db_pool_max)?;
        let db_monitor_interval = Duration::from_secs(parse_or(
            "DB_MONITOR_INTERVAL_SECS",
            lookup("DB_MONITOR_INTERVAL_SECS"),
            defaults.db_monitor_interval.as_secs(),
        )?);

        let enabled = parse_or("AUTH_ENABLED", lookup("AUTH_ENABLED"), true)?;
        let jwt_key = resolve_secret(lookup("AUTH_JWT_KEY_FILE"), lookup("AUTH_JWT_KEY"))?;
        let jwt_key_url = lookup("AUTH_JWT_KEY_URL").filter(|url| !url.is_empty());
        if enabled && jwt_key.is_none() && jwt_key_url.is_none() {
            return Err(ConfigError::MissingAuthKey);
        }
        let write_scope = lookup("AUTH_WRITE_SCOPE").unwrap_or(defaults.auth.write_scope);

        Ok(Self {
            server_port,
            openapi_path,
            database_url,
            db_pool_max,
            db_monitor_interval,
            auth: AuthConfig {
                enabled,
                jwt_key,
                jwt_key_url,
                write_scope,
            },
            service_version: lookup("SVC_VERSION").unwrap_or(defaults.service_version),
            service_commit_id: lookup("SVC_COMMIT_ID").unwrap_or(defaults.service_commit_id),
        })
    }

    /// Log the loaded configuration, masking credentials.
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  PORT                     : {}", self.server_port);
        info!("  OPENAPI_PATH             : {}", self.openapi_path);
        info!(
            "  DATABASE_URL             : {}",
            self.database_url
                .as_deref()
                .map(mask_password)
                .unwrap_or_else(|| "<in-memory>".to_string())
        );
        info!("  DB_POOL_MAX              : {}", self.db_pool_max);
        info!(
            "  DB_MONITOR_INTERVAL_SECS : {}",
            self.db_monitor_interval.as_secs()
        );
        info!("  AUTH_ENABLED             : {}", self.auth.enabled);
        info!(
            "  AUTH_JWT_KEY_URL         : {}",
            self.auth.jwt_key_url.as_deref().unwrap_or("<unset>")
        );
        info!("  AUTH_WRITE_SCOPE         : {}", self.auth.write_scope);
    }
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    match raw {
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn normalize_mount_path(path: &str) -> Result<String, ConfigError> {
    let trimmed = path.trim().trim_end_matches('/');
    if !trimmed.starts_with('/') {
        return Err(ConfigError::Invalid {
            var: "OPENAPI_PATH",
            reason: format!("{path:?} must start with '/' and must not be the root"),
        });
    }
    Ok(trimmed.to_string())
}

/// Hides the password part of a connection string.
fn mask_password(url: &str) -> String {
    let authority_start = url.find("://").map_or(0, |pos| pos + 3);
    if let Some(at_pos) = url.rfind('@')
        && at_pos > authority_start
        && let Some(colon_pos) = url[authority_start..at_pos].rfind(':')
    {
        let colon_pos = authority_start + colon_pos;
        return format!("{}:****{}", &url[..colon_pos], &url[at_pos..]);
    }
    url.to_string()
}
