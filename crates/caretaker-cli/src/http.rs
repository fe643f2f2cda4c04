//! HTTP client for the ingestion gateway.

use async_trait::async_trait;
use caretaker_core::config::ClientConfig;
use caretaker_core::models::NewAlert;
use caretaker_core::sync::RemoteAlertStore;
use caretaker_core::util::compact_text;
use caretaker_core::{AlertId, AlertSnapshot, FeedError, RemoteWriteError};
use reqwest::{StatusCode, Url};
use serde::Deserialize;

use crate::error::CliError;
use crate::feed::SnapshotSource;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedAlert {
    alert_key: String,
}

#[derive(Clone)]
pub struct HttpAlertClient {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpAlertClient {
    pub fn new(config: &ClientConfig) -> Result<Self, CliError> {
        let base_url = Url::parse(&config.gateway_url)
            .map_err(|error| CliError::Http(format!("invalid gateway URL: {error}")))?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|error| CliError::Http(format!("failed to build HTTP client: {error}")))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, String> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| format!("gateway URL cannot be a base: {}", self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Read the whole remote alert collection.
    pub async fn fetch_snapshot(&self) -> Result<AlertSnapshot, FeedError> {
        let url = self.endpoint(&["alerts"]).map_err(FeedError::Unavailable)?;
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| FeedError::Unavailable(format!("alerts request failed: {error}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            FeedError::Unavailable(format!("failed to read alerts response body: {error}"))
        })?;

        if !status.is_success() {
            let message = format!(
                "gateway returned HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            );
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FeedError::Cancelled(message),
                _ => FeedError::Unavailable(message),
            });
        }

        AlertSnapshot::from_json(&body)
            .map_err(|error| FeedError::InvalidPayload(error.to_string()))
    }

    /// Report a new alert. Returns the key the gateway assigned.
    pub async fn post_alert(&self, alert: &NewAlert) -> Result<String, CliError> {
        let url = self.endpoint(&["alert"]).map_err(CliError::Http)?;
        let response = self
            .client
            .post(url)
            .json(alert)
            .send()
            .await
            .map_err(|error| CliError::Http(format!("alert request failed: {error}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            CliError::Http(format!("failed to read alert response body: {error}"))
        })?;
        if !status.is_success() {
            return Err(CliError::Gateway(format!(
                "HTTP {}: {}",
                status.as_u16(),
                compact_text(&body)
            )));
        }

        let created: CreatedAlert = serde_json::from_str(&body)?;
        Ok(created.alert_key)
    }
}

#[async_trait]
impl SnapshotSource for HttpAlertClient {
    async fn fetch_snapshot(&self) -> Result<AlertSnapshot, FeedError> {
        Self::fetch_snapshot(self).await
    }
}

#[async_trait]
impl RemoteAlertStore for HttpAlertClient {
    async fn set_acknowledged(&self, id: &AlertId) -> Result<(), RemoteWriteError> {
        let url = self
            .endpoint(&["alerts", id.as_str(), "acknowledge"])
            .map_err(RemoteWriteError::Unreachable)?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|error| RemoteWriteError::Unreachable(error.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        if status == StatusCode::NOT_FOUND {
            return Err(RemoteWriteError::NotFound(id.to_string()));
        }
        let body = response.text().await.unwrap_or_default();
        Err(RemoteWriteError::Rejected(format!(
            "HTTP {}: {}",
            status.as_u16(),
            compact_text(&body)
        )))
    }
}
