//! First-time surface dispatch for active alerts

use std::collections::HashSet;
use std::sync::Arc;

use crate::classify::{classify, surface_body};
use crate::models::{AlertId, AlertRecord};

use super::notifier::{AlertSurface, Notifier, SurfaceId};

/// Ids for which a surface has been raised during this process.
///
/// Only grows. Not persisted, so a restart can raise a surface again for an
/// alert that is still active.
#[derive(Debug, Default, Clone)]
pub struct NotifiedSet {
    ids: HashSet<AlertId>,
}

impl NotifiedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &AlertId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `false` if the id was already present.
    pub fn insert(&mut self, id: AlertId) -> bool {
        self.ids.insert(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Outcome of one dispatch pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    /// Alerts whose surface was raised in this pass
    pub raised: Vec<AlertId>,
    /// Alerts whose surface could not be raised, with the notifier's message
    pub failed: Vec<(AlertId, String)>,
}

/// Build the surface for an alert.
pub fn surface_for(record: &AlertRecord) -> AlertSurface {
    let classification = classify(&record.alert_type);
    AlertSurface {
        surface_id: SurfaceId::for_alert(&record.id),
        alert_id: record.id.clone(),
        category: classification.category,
        body: surface_body(classification.category, &record.alert_type),
        title: classification.label,
    }
}

/// Raises one surface per new active alert.
pub struct NotificationDispatcher {
    notifier: Arc<dyn Notifier>,
    notified: NotifiedSet,
}

impl NotificationDispatcher {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            notified: NotifiedSet::new(),
        }
    }

    /// Raise surfaces for every active alert not yet in the notified set.
    ///
    /// An id enters the set even when the notifier fails, keeping delivery at
    /// most once per process.
    pub fn dispatch(&mut self, active: &[AlertRecord]) -> DispatchReport {
        let mut report = DispatchReport::default();

        for record in active {
            if self.notified.contains(&record.id) {
                continue;
            }

            let surface = surface_for(record);
            match self.notifier.raise(&surface) {
                Ok(()) => {
                    tracing::info!(
                        alert_id = %record.id,
                        alert_type = %record.alert_type,
                        "raised alert surface"
                    );
                    report.raised.push(record.id.clone());
                }
                Err(error) => {
                    tracing::warn!(
                        alert_id = %record.id,
                        "failed to raise alert surface: {}",
                        error
                    );
                    report.failed.push((record.id.clone(), error.to_string()));
                }
            }
            self.notified.insert(record.id.clone());
        }

        report
    }

    #[must_use]
    pub const fn notified(&self) -> &NotifiedSet {
        &self.notified
    }
}
