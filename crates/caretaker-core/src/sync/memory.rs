//! In-memory remote alert store that pushes full snapshots to subscribers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};

use crate::error::{FeedError, RemoteWriteError};
use crate::models::{AlertId, AlertRecord, AlertSnapshot, NewAlert};
use crate::util::unix_timestamp_millis_now;
use crate::Result;

use super::remote::{FeedEvent, RemoteAlertStore};

/// Shared in-memory alert collection.
///
/// Every change is pushed to all subscribers as a whole snapshot, the same way
/// a live remote collection notifies listeners.
#[derive(Clone, Default)]
pub struct InMemoryAlertStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Default)]
struct MemoryState {
    snapshot: AlertSnapshot,
    subscribers: Vec<mpsc::UnboundedSender<FeedEvent>>,
    fail_writes: bool,
    write_attempts: usize,
}

impl MemoryState {
    fn publish(&mut self, event: &FeedEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    fn publish_snapshot(&mut self) {
        let event = FeedEvent::Snapshot(self.snapshot.clone());
        self.publish(&event);
    }
}

impl InMemoryAlertStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to the collection. The current snapshot is delivered first.
    pub async fn subscribe(&self) -> mpsc::UnboundedReceiver<FeedEvent> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.inner.lock().await;
        if sender
            .send(FeedEvent::Snapshot(state.snapshot.clone()))
            .is_ok()
        {
            state.subscribers.push(sender);
        }
        receiver
    }

    /// Create a record with a store-assigned id.
    pub async fn create(&self, alert: NewAlert, default_device_id: &str) -> Result<AlertRecord> {
        let wire = alert.into_wire(unix_timestamp_millis_now(), default_device_id)?;
        let record = AlertRecord::from_wire(AlertId::generate(), wire);

        let mut state = self.inner.lock().await;
        state.snapshot.insert(record.clone());
        state.publish_snapshot();
        Ok(record)
    }

    /// Insert or overwrite a record as-is.
    pub async fn upsert(&self, record: AlertRecord) {
        let mut state = self.inner.lock().await;
        state.snapshot.insert(record);
        state.publish_snapshot();
    }

    /// Replace the whole collection.
    pub async fn replace(&self, snapshot: AlertSnapshot) {
        let mut state = self.inner.lock().await;
        state.snapshot = snapshot;
        state.publish_snapshot();
    }

    pub async fn snapshot(&self) -> AlertSnapshot {
        self.inner.lock().await.snapshot.clone()
    }

    /// Deliver a failure to every subscriber.
    pub async fn fail_subscribers(&self, error: FeedError) {
        let mut state = self.inner.lock().await;
        state.publish(&FeedEvent::Failed(error));
    }

    /// Make acknowledge writes fail until switched back.
    pub async fn fail_writes(&self, fail: bool) {
        self.inner.lock().await.fail_writes = fail;
    }

    /// Number of acknowledge writes attempted, failed ones included
    pub async fn write_count(&self) -> usize {
        self.inner.lock().await.write_attempts
    }
}

#[async_trait]
impl RemoteAlertStore for InMemoryAlertStore {
    async fn set_acknowledged(&self, id: &AlertId) -> std::result::Result<(), RemoteWriteError> {
        let mut state = self.inner.lock().await;
        state.write_attempts += 1;
        if state.fail_writes {
            return Err(RemoteWriteError::Unreachable(
                "in-memory store is offline".to_string(),
            ));
        }

        let Some(existing) = state.snapshot.get(id).cloned() else {
            return Err(RemoteWriteError::NotFound(id.to_string()));
        };
        state.snapshot.insert(AlertRecord {
            acknowledged: true,
            ..existing
        });
        state.publish_snapshot();
        Ok(())
    }
}
