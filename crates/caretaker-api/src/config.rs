use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use caretaker_core::models::DEFAULT_DEVICE_ID;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub database_path: PathBuf,
    /// Device id stamped on reports that do not name one
    pub default_device_id: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = value_or_default(&lookup, "CARETAKER_API_BIND_ADDR", "127.0.0.1:3000");
        if !bind_addr.contains(':') {
            return Err(ConfigError::Invalid(
                "CARETAKER_API_BIND_ADDR must be host:port".to_string(),
            ));
        }

        let database_path = PathBuf::from(value_or_default(
            &lookup,
            "CARETAKER_API_DB_PATH",
            "caretaker-alerts.db",
        ));

        let default_device_id =
            value_or_default(&lookup, "CARETAKER_DEFAULT_DEVICE_ID", DEFAULT_DEVICE_ID);

        Ok(Self {
            bind_addr,
            database_path,
            default_device_id,
        })
    }
}

fn value_or_default(lookup: impl Fn(&str) -> Option<String>, name: &str, default: &str) -> String {
    optional_trimmed(lookup, name).unwrap_or_else(|| default.to_string())
}

fn optional_trimmed(lookup: impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name).and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
