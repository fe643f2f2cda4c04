use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use caretaker_core::config::ClientConfig;
use caretaker_core::models::{NewAlert, DEFAULT_DEVICE_ID};
use caretaker_core::state::{FeedState, ViewFreshness};
use caretaker_core::sync::{
    project, AckOutcome, AlertSyncEngine, InMemoryAlertStore, RecordingNotifier,
};
use caretaker_core::{AlertId, AlertRecord, AlertSnapshot, AlertType, FeedError};
use clap::Parser;
use pretty_assertions::assert_eq;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::cli::{Cli, Commands, CompletionShell};
use crate::commands::ack::run_ack;
use crate::commands::common::{
    alert_to_list_item, format_alert_lines, format_relative_time, format_timestamp,
    select_alerts,
};
use crate::commands::completions::{render_completions, run_completions};
use crate::commands::watch::{format_freshness, parse_watch_input, WatchInput};
use crate::error::CliError;
use crate::feed::{PollingFeed, SnapshotSource};

fn record(id: &str, alert_type: AlertType, acknowledged: bool, timestamp: i64) -> AlertRecord {
    AlertRecord {
        id: AlertId::parse(id).unwrap(),
        alert_type,
        acknowledged,
        timestamp,
        device_id: Some(DEFAULT_DEVICE_ID.to_string()),
    }
}

fn sample_snapshot() -> AlertSnapshot {
    [
        record("a1", AlertType::FallDetected, false, 300),
        record("a2", AlertType::ShortHum, true, 200),
        record("a3", AlertType::GestureLeft, false, 100),
    ]
    .into_iter()
    .collect()
}

fn config_for(url: &str) -> ClientConfig {
    ClientConfig::default().with_gateway_url(url).unwrap()
}

#[test]
fn cli_parses_list_flags_and_global_gateway() {
    let cli = Cli::try_parse_from([
        "caretaker",
        "list",
        "--history",
        "--limit",
        "5",
        "--gateway-url",
        "http://gateway:3000",
    ])
    .unwrap();

    assert_eq!(cli.gateway_url.as_deref(), Some("http://gateway:3000"));
    match cli.command {
        Commands::List {
            history,
            limit,
            json,
        } => {
            assert!(history);
            assert_eq!(limit, Some(5));
            assert!(!json);
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn cli_parses_send_with_device() {
    let cli =
        Cli::try_parse_from(["caretaker", "send", "FALL_DETECTED", "--device-id", "wrist_02"])
            .unwrap();
    match cli.command {
        Commands::Send {
            alert_type,
            device_id,
        } => {
            assert_eq!(alert_type, "FALL_DETECTED");
            assert_eq!(device_id.as_deref(), Some("wrist_02"));
        }
        _ => panic!("expected send command"),
    }
}

#[test]
fn cli_requires_a_subcommand() {
    assert!(Cli::try_parse_from(["caretaker"]).is_err());
}

#[test]
fn parse_watch_input_accepts_ids_and_commands() {
    assert_eq!(
        parse_watch_input("ack a1"),
        WatchInput::Acknowledge("a1".to_string())
    );
    assert_eq!(
        parse_watch_input("  a1  \n"),
        WatchInput::Acknowledge("a1".to_string())
    );
    assert_eq!(parse_watch_input("LIST"), WatchInput::List);
    assert_eq!(parse_watch_input("status"), WatchInput::Status);
    assert_eq!(parse_watch_input("quit"), WatchInput::Quit);
    assert_eq!(parse_watch_input("   "), WatchInput::Blank);
    assert_eq!(
        parse_watch_input("ack a1 a2"),
        WatchInput::Unknown("ack a1 a2".to_string())
    );
}

#[test]
fn select_alerts_picks_view_and_limit() {
    let views = project(&sample_snapshot());

    let active = select_alerts(views.clone(), false, None);
    assert_eq!(
        active.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["a1", "a3"]
    );

    let history = select_alerts(views, true, Some(2));
    assert_eq!(
        history.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
        vec!["a1", "a2"]
    );
}

#[test]
fn format_alert_lines_include_label_device_and_status() {
    let lines = format_alert_lines(
        &[
            record("a1", AlertType::FallDetected, false, 0),
            record("a2", AlertType::LongHum, true, 0),
        ],
        30_000,
    );

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("a1 "));
    assert!(lines[0].contains("⚠️🆘 Fall Detected"));
    assert!(lines[0].contains("wearable_01"));
    assert!(lines[0].contains("just now"));
    assert!(lines[0].ends_with("ACTIVE"));
    assert!(lines[1].contains("🚨 Long Hum"));
    assert!(lines[1].ends_with("acked"));
}

#[test]
fn alert_list_item_serializes_wire_names() {
    let item = alert_to_list_item(&record("a1", AlertType::ProlongedInactivity, false, 0), 0);
    let json = serde_json::to_value(&item).unwrap();

    assert_eq!(json["type"], "PROLONGED_INACTIVITY");
    assert_eq!(json["label"], "⚠️🆘 Prolonged Inactivity");
    assert_eq!(json["category"], "Urgent");
    assert_eq!(json["icon"], "Info");
    assert_eq!(json["timestamp_iso"], "1970-01-01 00:00:00 UTC");
}

#[test]
fn format_relative_time_units() {
    let now = 10_000_000_000;
    assert_eq!(format_relative_time(now - 30_000, now), "just now");
    assert_eq!(format_relative_time(now - 120_000, now), "2m ago");
    assert_eq!(format_relative_time(now - 2 * 60 * 60_000, now), "2h ago");
    assert_eq!(format_relative_time(now - 3 * 24 * 60 * 60_000, now), "3d ago");
}

#[test]
fn format_timestamp_returns_utc_label() {
    assert_eq!(format_timestamp(0), "1970-01-01 00:00:00 UTC");
}

#[test]
fn format_freshness_reports_stale_error() {
    let freshness = ViewFreshness {
        state: FeedState::Stale,
        last_snapshot_at: Some(0),
        last_error: Some("Alert feed unavailable: down".to_string()),
    };
    assert_eq!(
        format_freshness(&freshness, 120_000),
        "feed stale (Alert feed unavailable: down), last snapshot 2m ago"
    );
    assert_eq!(
        format_freshness(&ViewFreshness::default(), 0),
        "feed connecting"
    );
}

#[test]
fn run_completions_writes_bash_script_file() {
    let dir = tempdir().unwrap();
    let output_path = dir.path().join("caretaker.bash");

    run_completions(CompletionShell::Bash, Some(&output_path)).unwrap();

    let script = std::fs::read_to_string(&output_path).unwrap();
    assert!(script.contains("_caretaker()"));
    assert!(script.contains("complete -F _caretaker"));
}

#[test]
fn render_completions_covers_subcommands() {
    let script = String::from_utf8(render_completions(CompletionShell::Fish)).unwrap();
    for subcommand in ["watch", "list", "ack", "send", "completions"] {
        assert!(script.contains(subcommand), "missing {subcommand}");
    }
}

async fn spawn_one_shot_server(status_line: &str, body: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let address = listener.local_addr().expect("local address");
    let body = body.to_string();
    let response = format!(
        "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        body.len(),
        body
    );

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut request_buffer = [0_u8; 1024];
            let _ = socket.read(&mut request_buffer).await;
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    format!("http://{address}")
}

#[tokio::test]
async fn run_ack_succeeds_when_gateway_accepts() {
    let url = spawn_one_shot_server("204 No Content", "").await;
    run_ack(&config_for(&url), "a1").await.unwrap();
}

#[tokio::test]
async fn run_ack_reports_failed_write() {
    let url = spawn_one_shot_server("404 Not Found", r#"{"error":"Not found: alert a1"}"#).await;
    let error = run_ack(&config_for(&url), "a1").await.unwrap_err();
    assert!(matches!(error, CliError::AcknowledgeFailed(_)));
    assert!(error.to_string().contains("a1"));
}

#[tokio::test]
async fn run_ack_rejects_blank_id() {
    let error = run_ack(&config_for("http://127.0.0.1:9"), "   ").await.unwrap_err();
    assert!(matches!(error, CliError::EmptyAlertId));
}

#[async_trait]
impl SnapshotSource for InMemoryAlertStore {
    async fn fetch_snapshot(&self) -> Result<AlertSnapshot, FeedError> {
        Ok(self.snapshot().await)
    }
}

async fn wait_until<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn watch_pipeline_raises_once_and_clears_after_acknowledge() {
    let store = Arc::new(InMemoryAlertStore::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let engine = Arc::new(AlertSyncEngine::new(notifier.clone(), store.clone()));

    let mut feed = PollingFeed::new(store.clone(), Duration::from_millis(2));
    let feed_engine = Arc::clone(&engine);
    let feed_task = tokio::spawn(async move { feed_engine.run(&mut feed).await });

    let fall = store
        .create(NewAlert::new("FALL_DETECTED"), DEFAULT_DEVICE_ID)
        .await
        .unwrap();
    wait_until(|| {
        let engine = Arc::clone(&engine);
        async move { engine.active().await.len() == 1 }
    })
    .await;

    // Further polls of the same collection must not raise again.
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(notifier.raise_count(&fall.id), 1);
    assert_eq!(notifier.visible().len(), 1);

    let outcome = engine.acknowledge_and_wait(fall.id.as_str()).await;
    assert_eq!(outcome, AckOutcome::Written);
    assert!(notifier.visible().is_empty());

    wait_until(|| {
        let engine = Arc::clone(&engine);
        async move { engine.active().await.is_empty() && engine.history().await.len() == 1 }
    })
    .await;
    assert_eq!(notifier.raise_count(&fall.id), 1);

    feed_task.abort();
}
