use std::sync::Arc;

use caretaker_core::classify::{classify, AlertCategory, AlertIcon};
use caretaker_core::config::ClientConfig;
use caretaker_core::sync::AlertViews;
use caretaker_core::AlertRecord;
use serde::Serialize;

use crate::error::CliError;
use crate::http::HttpAlertClient;

#[derive(Debug, Serialize)]
pub struct AlertListItem {
    pub id: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub label: String,
    pub category: AlertCategory,
    pub icon: AlertIcon,
    pub acknowledged: bool,
    pub timestamp: i64,
    pub timestamp_iso: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub relative_time: String,
}

pub fn build_client(config: &ClientConfig) -> Result<Arc<HttpAlertClient>, CliError> {
    Ok(Arc::new(HttpAlertClient::new(config)?))
}

/// Pick the view to show and cap it. Views are already newest first.
pub fn select_alerts(views: AlertViews, history: bool, limit: Option<usize>) -> Vec<AlertRecord> {
    let mut alerts = if history { views.history } else { views.active };
    if let Some(limit) = limit {
        alerts.truncate(limit);
    }
    alerts
}

pub fn alert_to_list_item(record: &AlertRecord, now_ms: i64) -> AlertListItem {
    let classification = classify(&record.alert_type);
    AlertListItem {
        id: record.id.to_string(),
        alert_type: record.alert_type.to_string(),
        label: classification.label,
        category: classification.category,
        icon: classification.icon,
        acknowledged: record.acknowledged,
        timestamp: record.timestamp,
        timestamp_iso: format_timestamp(record.timestamp),
        device_id: record.device_id.clone(),
        relative_time: format_relative_time(record.timestamp, now_ms),
    }
}

pub fn format_alert_lines(alerts: &[AlertRecord], now_ms: i64) -> Vec<String> {
    alerts
        .iter()
        .map(|record| {
            let label = classify(&record.alert_type).label;
            let device = record.device_id.as_deref().unwrap_or("-");
            let relative_time = format_relative_time(record.timestamp, now_ms);
            let status = if record.acknowledged { "acked" } else { "ACTIVE" };
            let id = record.id.as_str();
            format!("{id:<32}  {label:<28}  {device:<12}  {relative_time:<10}  {status}")
        })
        .collect()
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

pub fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else {
        format!("{}d ago", diff / day)
    }
}
