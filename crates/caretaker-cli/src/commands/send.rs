use caretaker_core::config::ClientConfig;
use caretaker_core::models::NewAlert;
use caretaker_core::util::normalize_text_option;

use crate::commands::common::build_client;
use crate::error::CliError;

pub async fn run_send(
    config: &ClientConfig,
    alert_type: &str,
    device_id: Option<&str>,
) -> Result<(), CliError> {
    let alert_type =
        normalize_text_option(Some(alert_type.to_string())).ok_or(CliError::EmptyAlertType)?;
    let mut alert = NewAlert::new(alert_type);
    if let Some(device_id) = device_id {
        alert = alert.with_device_id(device_id);
    }

    let client = build_client(config)?;
    let key = client.post_alert(&alert).await?;
    println!("{key}");
    Ok(())
}
