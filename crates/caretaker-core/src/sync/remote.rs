//! Remote alert feed and store contracts

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::{FeedError, RemoteWriteError};
use crate::models::{AlertId, AlertSnapshot};

/// One delivery from the remote alert subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// The full current collection
    Snapshot(AlertSnapshot),
    /// The subscription reported a failure
    Failed(FeedError),
}

/// Subscription that delivers feed events one at a time.
///
/// `None` means the subscription has ended.
#[async_trait]
pub trait RemoteAlertFeed: Send {
    async fn next_event(&mut self) -> Option<FeedEvent>;
}

#[async_trait]
impl RemoteAlertFeed for mpsc::Receiver<FeedEvent> {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        self.recv().await
    }
}

#[async_trait]
impl RemoteAlertFeed for mpsc::UnboundedReceiver<FeedEvent> {
    async fn next_event(&mut self) -> Option<FeedEvent> {
        self.recv().await
    }
}

/// Writable side of the remote alert collection
#[async_trait]
pub trait RemoteAlertStore: Send + Sync {
    /// Set `acknowledged = true` on the record. Overwrites, never toggles.
    async fn set_acknowledged(&self, id: &AlertId) -> Result<(), RemoteWriteError>;
}
