//! API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::path::PathBuf;

use ritmo_core::CurrencyProfile;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Interface the HTTP server binds to
    pub bind_addr: String,

    /// HTTP server port
    pub port: u16,

    /// Path to the JSON storage document
    pub storage_path: PathBuf,

    /// Create an empty storage document when it is missing
    pub create_storage: bool,

    /// Currency used to render amounts in responses
    pub display_currency: CurrencyProfile,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            bind_addr: "0.0.0.0".to_string(),
            port: 8080,
            storage_path: PathBuf::from("storage/storage.json"),
            create_storage: false,
            display_currency: CurrencyProfile::EUR,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            bind_addr: lookup("RITMO_BIND_ADDR").unwrap_or(defaults.bind_addr),

            port: match lookup("RITMO_PORT") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("RITMO_PORT".to_string()))?,
                None => defaults.port,
            },

            storage_path: lookup("RITMO_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),

            create_storage: match lookup("RITMO_CREATE_STORAGE") {
                Some(raw) => parse_bool(&raw)
                    .ok_or_else(|| ConfigError::InvalidValue("RITMO_CREATE_STORAGE".to_string()))?,
                None => defaults.create_storage,
            },

            display_currency: match lookup("RITMO_DISPLAY_CURRENCY") {
                Some(raw) => CurrencyProfile::from_code(&raw).ok_or_else(|| {
                    ConfigError::InvalidValue("RITMO_DISPLAY_CURRENCY".to_string())
                })?,
                None => defaults.display_currency,
            },
        };

        if config.storage_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingRequired("RITMO_STORAGE_PATH".to_string()));
        }

        Ok(config)
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
