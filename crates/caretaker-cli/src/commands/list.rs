use caretaker_core::config::ClientConfig;
use caretaker_core::sync::project;
use caretaker_core::util::unix_timestamp_millis_now;

use crate::commands::common::{
    alert_to_list_item, build_client, format_alert_lines, select_alerts, AlertListItem,
};
use crate::error::CliError;

pub async fn run_list(
    config: &ClientConfig,
    history: bool,
    limit: Option<usize>,
    as_json: bool,
) -> Result<(), CliError> {
    let client = build_client(config)?;
    let snapshot = client.fetch_snapshot().await?;
    let alerts = select_alerts(project(&snapshot), history, limit);
    let now_ms = unix_timestamp_millis_now();

    if as_json {
        let json_items = alerts
            .iter()
            .map(|record| alert_to_list_item(record, now_ms))
            .collect::<Vec<AlertListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
        return Ok(());
    }

    if alerts.is_empty() {
        println!(
            "{}",
            if history {
                "No alerts recorded."
            } else {
                "No active alerts."
            }
        );
        return Ok(());
    }

    for line in format_alert_lines(&alerts, now_ms) {
        println!("{line}");
    }
    Ok(())
}
