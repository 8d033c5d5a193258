//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOSTMART_DATA_FILE` - Path of the JSON data file (default: `boostmart-data.json`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_FILE: &str = "boostmart-data.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Where the key-value store is persisted.
    pub data_file: PathBuf,
}

impl StorefrontConfig {
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
        let data_file = match lookup("BOOSTMART_DATA_FILE") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::InvalidEnvVar(
                    "BOOSTMART_DATA_FILE".to_string(),
                    "path cannot be empty".to_string(),
                ));
            }
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_DATA_FILE),
        };

        Ok(Self { data_file })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_file() {
        let config = StorefrontConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.data_file, PathBuf::from("boostmart-data.json"));
    }

    #[test]
    fn test_custom_data_file() {
        let config = StorefrontConfig::from_lookup(|key| {
            (key == "BOOSTMART_DATA_FILE").then(|| "/var/lib/boostmart/store.json".to_owned())
        })
        .unwrap();
        assert_eq!(
            config.data_file,
            PathBuf::from("/var/lib/boostmart/store.json")
        );
    }

    #[test]
    fn test_empty_data_file_rejected() {
        let err = StorefrontConfig::from_lookup(|_| Some("  ".to_owned())).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(..)));
    }
}
