//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CART_API_BASE_URL` - Base URL of the inventory API
//!   (e.g., <http://localhost:3333>)
//!
//! ## Optional
//! - `CART_STORAGE_DIR` - Directory holding the durable cart slot
//!   (default: `./.shopcart`)
//! - `CART_STORAGE_KEY` - Key the serialized cart is stored under
//!   (default: `shopcart:cart`)

use std::env;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default directory for the filesystem slot.
const DEFAULT_STORAGE_DIR: &str = "./.shopcart";

/// Default key the serialized cart is stored under.
const DEFAULT_STORAGE_KEY: &str = "shopcart:cart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Inventory API configuration
    pub inventory: InventoryConfig,
    /// Directory holding the durable cart slot
    pub storage_dir: PathBuf,
    /// Key the serialized cart is stored under
    pub storage_key: String,
}

/// Inventory API configuration.
#[derive(Debug, Clone)]
pub struct InventoryConfig {
    /// Base URL of the inventory API, without a trailing slash
    pub base_url: String,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base_url = require_env("CART_API_BASE_URL")?;
        let base_url = validate_base_url("CART_API_BASE_URL", &base_url)?;

        let storage_dir = env::var("CART_STORAGE_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_STORAGE_DIR), PathBuf::from);

        let storage_key =
            env::var("CART_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());

        Ok(Self {
            inventory: InventoryConfig { base_url },
            storage_dir,
            storage_key,
        })
    }
}

/// Read a required environment variable.
fn require_env(name: &str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

/// Parse and normalize a base URL, stripping any trailing slash.
fn validate_base_url(name: &str, value: &str) -> Result<String, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            name.to_string(),
            format!("unsupported scheme: {}", url.scheme()),
        ));
    }

    Ok(value.trim_end_matches('/').to_string())
}
