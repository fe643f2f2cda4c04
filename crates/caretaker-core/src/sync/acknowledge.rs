//! Acknowledge command: retract the local surface, then write remote state.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::models::AlertId;

use super::notifier::{Notifier, SurfaceId};
use super::remote::RemoteAlertStore;

/// What happened to an acknowledge command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckOutcome {
    /// Blank id; nothing was touched.
    Ignored,
    /// The remote write succeeded.
    Written,
    /// The remote write failed. The alert stays active remotely.
    WriteFailed(String),
}

#[derive(Clone)]
pub struct AcknowledgeCoordinator {
    notifier: Arc<dyn Notifier>,
    store: Arc<dyn RemoteAlertStore>,
}

impl AcknowledgeCoordinator {
    pub fn new(notifier: Arc<dyn Notifier>, store: Arc<dyn RemoteAlertStore>) -> Self {
        Self { notifier, store }
    }

    /// Fire-and-forget acknowledge. Must be called inside a Tokio runtime.
    ///
    /// Returns as soon as the surface is retracted; the remote write runs in
    /// the background and its failure is only logged.
    pub fn acknowledge(&self, id: &str) {
        drop(self.acknowledge_tracked(id));
    }

    /// Like [`Self::acknowledge`], but hands back the write task so callers
    /// can opt into observing the outcome.
    pub fn acknowledge_tracked(&self, id: &str) -> Option<JoinHandle<AckOutcome>> {
        let id = AlertId::parse(id)?;
        self.retract_surface(&id);

        let store = Arc::clone(&self.store);
        Some(tokio::spawn(async move { write_acknowledged(store.as_ref(), &id).await }))
    }

    /// Acknowledge and wait for the remote write.
    pub async fn acknowledge_and_wait(&self, id: &str) -> AckOutcome {
        let Some(id) = AlertId::parse(id) else {
            return AckOutcome::Ignored;
        };
        self.retract_surface(&id);
        write_acknowledged(self.store.as_ref(), &id).await
    }

    fn retract_surface(&self, id: &AlertId) {
        if let Err(error) = self.notifier.retract(&SurfaceId::for_alert(id)) {
            tracing::warn!(alert_id = %id, "failed to retract alert surface: {}", error);
        }
    }
}

async fn write_acknowledged(store: &dyn RemoteAlertStore, id: &AlertId) -> AckOutcome {
    match store.set_acknowledged(id).await {
        Ok(()) => {
            tracing::debug!(alert_id = %id, "acknowledged alert");
            AckOutcome::Written
        }
        Err(error) => {
            tracing::warn!(alert_id = %id, "failed to acknowledge alert: {}", error);
            AckOutcome::WriteFailed(error.to_string())
        }
    }
}
