//! Cart persistence configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKET_STORAGE_DIR` - Base directory for cart snapshots (default: `./data`)
//! - `GOMARKET_CART_NAMESPACE` - Prefix for storage keys (default: `@GoMarket`)

use std::path::PathBuf;

use thiserror::Error;

/// Default key namespace, matching the mobile app's storage prefix.
pub const DEFAULT_NAMESPACE: &str = "@GoMarket";

/// Default directory for file-backed snapshots.
const DEFAULT_STORAGE_DIR: &str = "./data";

/// Slot name for the cart snapshot within the namespace.
const CART_SLOT: &str = "cartProducts";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart persistence configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Base directory for file-backed storage.
    pub storage_dir: PathBuf,
    /// Namespace prefixed to every storage key.
    pub namespace: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present. Every
    /// variable has a default, so loading only fails on invalid values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the namespace is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let storage_dir = PathBuf::from(get_env_or_default(
            "GOMARKET_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let namespace = get_env_or_default("GOMARKET_CART_NAMESPACE", DEFAULT_NAMESPACE);
        validate_namespace(&namespace, "GOMARKET_CART_NAMESPACE")?;

        Ok(Self {
            storage_dir,
            namespace,
        })
    }

    /// The fixed storage key for the cart snapshot.
    #[must_use]
    pub fn cart_key(&self) -> String {
        format!("{}:{CART_SLOT}", self.namespace)
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            namespace: DEFAULT_NAMESPACE.to_owned(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Validate that a namespace is usable as a key prefix.
fn validate_namespace(namespace: &str, var_name: &str) -> Result<(), ConfigError> {
    if namespace.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}
