//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOSTMART_ADMIN_USERNAME` - Admin login name (default: `admin`)
//! - `BOOSTMART_ADMIN_PASSWORD` - Admin password (default: the demo password)
//!
//! The credential check is a plain comparison. It gates the console against
//! accidents, not attackers.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "Arya123@";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin console configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct AdminConfig {
    /// Expected admin username.
    pub username: String,
    /// Expected admin password.
    pub password: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_owned(),
            password: SecretString::from(DEFAULT_PASSWORD),
        }
    }
}

impl AdminConfig {
    /// Load configuration from the process environment (and `.env`).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is set but empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let username = non_empty(&lookup, "BOOSTMART_ADMIN_USERNAME")?
            .unwrap_or_else(|| DEFAULT_USERNAME.to_owned());
        let password = non_empty(&lookup, "BOOSTMART_ADMIN_PASSWORD")?
            .map_or_else(|| SecretString::from(DEFAULT_PASSWORD), SecretString::from);

        Ok(Self { username, password })
    }

    /// Compare a login attempt against the configured credentials.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password.expose_secret()
    }
}

fn non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Some(value) if value.is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "value cannot be empty".to_string(),
        )),
        other => Ok(other),
    }
}
