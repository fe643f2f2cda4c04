//! Polling adapter that turns gateway reads into a snapshot feed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use caretaker_core::sync::{FeedEvent, RemoteAlertFeed};
use caretaker_core::{AlertSnapshot, FeedError};
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Anything that can read the full remote alert collection.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<AlertSnapshot, FeedError>;
}

/// Polls a [`SnapshotSource`] on a fixed cadence.
///
/// Emits a snapshot only when it differs from the last one emitted, or when it
/// follows a failure. A run of failures is reported once.
pub struct PollingFeed {
    source: Arc<dyn SnapshotSource>,
    ticker: Interval,
    last_snapshot: Option<AlertSnapshot>,
    failing: bool,
}

impl PollingFeed {
    pub fn new(source: Arc<dyn SnapshotSource>, poll_interval: Duration) -> Self {
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            source,
            ticker,
            last_snapshot: None,
            failing: false,
        }
    }
}

#[async_trait]
impl RemoteAlertFeed for PollingFeed {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        loop {
            self.ticker.tick().await;
            match self.source.fetch_snapshot().await {
                Ok(snapshot) => {
                    let recovered = std::mem::replace(&mut self.failing, false);
                    if recovered || self.last_snapshot.as_ref() != Some(&snapshot) {
                        self.last_snapshot = Some(snapshot.clone());
                        return Some(FeedEvent::Snapshot(snapshot));
                    }
                }
                Err(error) => {
                    if !self.failing {
                        self.failing = true;
                        return Some(FeedEvent::Failed(error));
                    }
                    tracing::debug!("alert feed still failing: {}", error);
                }
            }
        }
    }
}
