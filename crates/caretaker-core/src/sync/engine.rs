//! Alert synchronization engine.
//!
//! Owns the derived views and the notified set for the lifetime of the
//! process. Hosts construct one at startup, feed it snapshot events in order,
//! and route acknowledge commands through it.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::error::FeedError;
use crate::models::{AlertRecord, AlertSnapshot};
use crate::state::ViewFreshness;
use crate::util::unix_timestamp_millis_now;

use super::acknowledge::{AckOutcome, AcknowledgeCoordinator};
use super::dispatcher::{DispatchReport, NotificationDispatcher};
use super::notifier::Notifier;
use super::projector::{AlertProjector, AlertViews};
use super::remote::{FeedEvent, RemoteAlertFeed, RemoteAlertStore};

pub struct AlertSyncEngine {
    projector: RwLock<AlertProjector>,
    dispatcher: Mutex<NotificationDispatcher>,
    acknowledger: AcknowledgeCoordinator,
}

impl AlertSyncEngine {
    pub fn new(notifier: Arc<dyn Notifier>, store: Arc<dyn RemoteAlertStore>) -> Self {
        Self {
            projector: RwLock::new(AlertProjector::new()),
            dispatcher: Mutex::new(NotificationDispatcher::new(Arc::clone(&notifier))),
            acknowledger: AcknowledgeCoordinator::new(notifier, store),
        }
    }

    /// Consume feed events until the subscription ends.
    pub async fn run<F>(&self, feed: &mut F)
    where
        F: RemoteAlertFeed + ?Sized,
    {
        while let Some(event) = feed.next_event().await {
            self.handle_event(event).await;
        }
        tracing::info!("alert feed subscription ended");
    }

    /// Handle a single feed event. Returns the dispatch report for snapshots.
    pub async fn handle_event(&self, event: FeedEvent) -> Option<DispatchReport> {
        match event {
            FeedEvent::Snapshot(snapshot) => Some(self.handle_snapshot(&snapshot).await),
            FeedEvent::Failed(error) => {
                self.handle_failure(&error).await;
                None
            }
        }
    }

    /// Project a snapshot and raise surfaces for newly seen active alerts.
    ///
    /// The dispatcher lock is held for the whole pass, so passes never
    /// interleave even if a host delivers snapshots concurrently.
    pub async fn handle_snapshot(&self, snapshot: &AlertSnapshot) -> DispatchReport {
        let mut dispatcher = self.dispatcher.lock().await;
        let active = {
            let mut projector = self.projector.write().await;
            projector
                .apply_snapshot(snapshot, unix_timestamp_millis_now())
                .active
                .clone()
        };
        dispatcher.dispatch(&active)
    }

    /// Record a feed failure; views stay as they are.
    pub async fn handle_failure(&self, error: &FeedError) {
        self.projector.write().await.record_failure(error);
    }

    pub async fn views(&self) -> AlertViews {
        self.projector.read().await.views().clone()
    }

    pub async fn active(&self) -> Vec<AlertRecord> {
        self.projector.read().await.views().active.clone()
    }

    pub async fn history(&self) -> Vec<AlertRecord> {
        self.projector.read().await.views().history.clone()
    }

    pub async fn freshness(&self) -> ViewFreshness {
        self.projector.read().await.freshness().clone()
    }

    pub async fn notified_count(&self) -> usize {
        self.dispatcher.lock().await.notified().len()
    }

    /// Fire-and-forget acknowledge; see [`AcknowledgeCoordinator::acknowledge`].
    pub fn acknowledge(&self, id: &str) {
        self.acknowledger.acknowledge(id);
    }

    pub fn acknowledge_tracked(&self, id: &str) -> Option<JoinHandle<AckOutcome>> {
        self.acknowledger.acknowledge_tracked(id)
    }

    pub async fn acknowledge_and_wait(&self, id: &str) -> AckOutcome {
        self.acknowledger.acknowledge_and_wait(id).await
    }

    /// Cloneable handle for issuing acknowledges from other tasks.
    pub fn acknowledger(&self) -> AcknowledgeCoordinator {
        self.acknowledger.clone()
    }
}
