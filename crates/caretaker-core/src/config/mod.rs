//! Client configuration for caretaker hosts.
//!
//! Resolves the gateway endpoint and polling cadence from the environment,
//! with a lookup seam so parsing can be tested without touching process env.

use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::util::{is_http_url, normalize_text_option};
use crate::{Error, Result};

pub const ENV_GATEWAY_URL: &str = "CARETAKER_GATEWAY_URL";
pub const ENV_POLL_INTERVAL_MS: &str = "CARETAKER_POLL_INTERVAL_MS";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "CARETAKER_REQUEST_TIMEOUT_SECS";

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_POLL_INTERVAL_MS: u64 = 2_000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Where and how often a host reads the remote alert collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway base URL without trailing slash
    pub gateway_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        let values: HashMap<String, String> = env::vars().collect();
        Self::from_lookup(|name| values.get(name).cloned())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let gateway_url = match normalize_text_option(lookup(ENV_GATEWAY_URL)) {
            Some(url) => normalize_gateway_url(&url)?,
            None => DEFAULT_GATEWAY_URL.to_string(),
        };

        let poll_interval_ms = parse_ranged(
            &lookup,
            ENV_POLL_INTERVAL_MS,
            DEFAULT_POLL_INTERVAL_MS,
            250..=60_000,
        )?;
        let request_timeout_secs = parse_ranged(
            &lookup,
            ENV_REQUEST_TIMEOUT_SECS,
            DEFAULT_REQUEST_TIMEOUT_SECS,
            1..=120,
        )?;

        Ok(Self {
            gateway_url,
            poll_interval: Duration::from_millis(poll_interval_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }

    /// Replace the gateway URL, e.g. from a command-line flag.
    pub fn with_gateway_url(mut self, url: &str) -> Result<Self> {
        self.gateway_url = normalize_gateway_url(url)?;
        Ok(self)
    }
}

/// Validate a gateway URL and strip trailing slashes.
pub fn normalize_gateway_url(raw: &str) -> Result<String> {
    let url = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| Error::Config("gateway URL must not be empty".to_string()))?;
    if !is_http_url(&url) {
        return Err(Error::Config(
            "gateway URL must include http:// or https://".to_string(),
        ));
    }
    Ok(url.trim_end_matches('/').to_string())
}

fn parse_ranged(
    lookup: impl Fn(&str) -> Option<String>,
    name: &str,
    default: u64,
    range: std::ops::RangeInclusive<u64>,
) -> Result<u64> {
    let Some(raw) = normalize_text_option(lookup(name)) else {
        return Ok(default);
    };
    let value = raw.parse::<u64>().map_err(|_| {
        Error::Config(format!(
            "{name} must be an integer in [{}, {}]",
            range.start(),
            range.end()
        ))
    })?;
    if !range.contains(&value) {
        return Err(Error::Config(format!(
            "{name} must be in [{}, {}]",
            range.start(),
            range.end()
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<ClientConfig> {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        ClientConfig::from_lookup(|key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(config_from(&[]).unwrap(), ClientConfig::default());
    }

    #[test]
    fn gateway_url_is_trimmed_and_validated() {
        let config = config_from(&[(ENV_GATEWAY_URL, " https://alerts.example.com/ ")]).unwrap();
        assert_eq!(config.gateway_url, "https://alerts.example.com");

        let error = config_from(&[(ENV_GATEWAY_URL, "alerts.example.com")]).unwrap_err();
        assert!(error.to_string().contains("http://"));
    }

    #[test]
    fn poll_interval_is_range_checked() {
        let config = config_from(&[(ENV_POLL_INTERVAL_MS, "500")]).unwrap();
        assert_eq!(config.poll_interval, Duration::from_millis(500));

        let error = config_from(&[(ENV_POLL_INTERVAL_MS, "10")]).unwrap_err();
        assert!(error.to_string().contains(ENV_POLL_INTERVAL_MS));

        let error = config_from(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")]).unwrap_err();
        assert!(error.to_string().contains("integer"));
    }

    #[test]
    fn flag_override_replaces_gateway_url() {
        let config = ClientConfig::default()
            .with_gateway_url("http://10.0.0.2:3000/")
            .unwrap();
        assert_eq!(config.gateway_url, "http://10.0.0.2:3000");
        assert!(ClientConfig::default().with_gateway_url("  ").is_err());
    }
}
