//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SCOREBUG_REDIS_URL` - Redis connection string (falls back to `REDIS_URL`)
//! - `SCOREBUG_BASE_URL` - Public URL of the service (shown on the setup screen)
//!
//! ## Optional
//! - `SCOREBUG_HOST` - Bind address (default: 127.0.0.1)
//! - `SCOREBUG_PORT` - Listen port (default: 3000)
//! - `SCOREBUG_SESSION_SECRET` - Credential cookie signing secret (min 32
//!   chars); cookies are unsigned when unset
//! - `SCOREBUG_DEVICE_NAME` - Default label for devices that claim without one
//! - `SCORES_API_BASE` - Stats provider base URL (default: NHL stats API)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::scores::DEFAULT_API_BASE;

/// Minimum length of the cookie signing secret. Anything shorter cannot
/// seed the signing key.
const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Scorebug service configuration.
#[derive(Debug, Clone)]
pub struct DisplayConfig {
    /// Redis connection URL (may contain a password)
    pub redis_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, shown on the setup screen as the address to visit
    pub base_url: String,
    /// Credential cookie signing secret; cookies are unsigned when absent
    pub session_secret: Option<SecretString>,
    /// Default device label applied when a claim carries none
    pub device_name: Option<String>,
    /// Stats provider base URL
    pub scores_api_base: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl DisplayConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid,
    /// or if the session secret fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let redis_url = get_redis_url("SCOREBUG_REDIS_URL")?;
        let host = get_env_or_default("SCOREBUG_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SCOREBUG_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SCOREBUG_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SCOREBUG_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("SCOREBUG_BASE_URL")?;
        validate_base_url(&base_url, "SCOREBUG_BASE_URL")?;

        let session_secret = match get_optional_env("SCOREBUG_SESSION_SECRET") {
            Some(value) => {
                validate_session_secret(&value, "SCOREBUG_SESSION_SECRET")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            redis_url,
            host,
            port,
            base_url,
            session_secret,
            device_name: get_optional_env("SCOREBUG_DEVICE_NAME"),
            scores_api_base: get_env_or_default("SCORES_API_BASE", DEFAULT_API_BASE),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS (drives the cookie
    /// `Secure` attribute).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get the Redis URL with fallback to generic `REDIS_URL`.
fn get_redis_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("REDIS_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that the base URL parses and has a host.
fn validate_base_url(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if url.host_str().is_none() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must have a host".to_string(),
        ));
    }
    Ok(())
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                secret.len()
            ),
        ));
    }
    Ok(())
}
