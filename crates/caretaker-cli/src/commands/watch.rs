use std::sync::Arc;

use caretaker_core::config::ClientConfig;
use caretaker_core::state::{FeedState, ViewFreshness};
use caretaker_core::sync::{AlertSyncEngine, Notifier};
use caretaker_core::util::unix_timestamp_millis_now;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::common::{build_client, format_alert_lines, format_relative_time};
use crate::error::CliError;
use crate::feed::PollingFeed;
use crate::notifier::TerminalNotifier;

/// One line typed while watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchInput {
    Acknowledge(String),
    List,
    Status,
    Quit,
    Blank,
    Unknown(String),
}

/// `ack <id>` or a bare id acknowledges; `list`, `status` and `quit` are commands.
pub fn parse_watch_input(line: &str) -> WatchInput {
    let trimmed = line.trim();
    let mut parts = trimmed.split_whitespace();
    let Some(head) = parts.next() else {
        return WatchInput::Blank;
    };
    let rest = parts.collect::<Vec<_>>();

    match (head.to_ascii_lowercase().as_str(), rest.as_slice()) {
        ("ack", [id]) => WatchInput::Acknowledge((*id).to_string()),
        ("list" | "ls", []) => WatchInput::List,
        ("status", []) => WatchInput::Status,
        ("quit" | "exit" | "q", []) => WatchInput::Quit,
        (_, []) => WatchInput::Acknowledge(head.to_string()),
        _ => WatchInput::Unknown(trimmed.to_string()),
    }
}

pub fn format_freshness(freshness: &ViewFreshness, now_ms: i64) -> String {
    let last = freshness.last_snapshot_at.map_or_else(
        || "never".to_string(),
        |at| format_relative_time(at, now_ms),
    );
    match freshness.state {
        FeedState::Connecting => "feed connecting".to_string(),
        FeedState::Live => format!("feed live, last snapshot {last}"),
        FeedState::Stale => format!(
            "feed stale ({}), last snapshot {last}",
            freshness.last_error.as_deref().unwrap_or("unknown error")
        ),
    }
}

pub async fn run_watch(config: &ClientConfig, bell: bool) -> Result<(), CliError> {
    let client = build_client(config)?;
    let notifier: Arc<dyn Notifier> = Arc::new(TerminalNotifier::stdout(bell));
    let engine = Arc::new(AlertSyncEngine::new(notifier, client.clone()));

    let mut feed = PollingFeed::new(client, config.poll_interval);
    let feed_engine = Arc::clone(&engine);
    let mut feed_task = tokio::spawn(async move { feed_engine.run(&mut feed).await });

    eprintln!(
        "Watching {} (type an alert id or `ack <id>` to acknowledge, `quit` to stop)",
        config.gateway_url
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    loop {
        tokio::select! {
            result = &mut feed_task => {
                return result.map_err(|error| CliError::FeedTask(error.to_string()));
            }
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if !handle_input(&engine, &line).await {
                        break;
                    }
                }
                None => stdin_open = false,
            },
        }
    }

    feed_task.abort();
    Ok(())
}

async fn handle_input(engine: &AlertSyncEngine, line: &str) -> bool {
    match parse_watch_input(line) {
        WatchInput::Acknowledge(id) => engine.acknowledge(&id),
        WatchInput::List => {
            let active = engine.active().await;
            if active.is_empty() {
                println!("No active alerts.");
            }
            for line in format_alert_lines(&active, unix_timestamp_millis_now()) {
                println!("{line}");
            }
        }
        WatchInput::Status => {
            let freshness = engine.freshness().await;
            println!(
                "{}; {} active",
                format_freshness(&freshness, unix_timestamp_millis_now()),
                engine.active().await.len()
            );
        }
        WatchInput::Quit => return false,
        WatchInput::Blank => {}
        WatchInput::Unknown(input) => eprintln!("Unrecognized input: {input}"),
    }
    true
}
