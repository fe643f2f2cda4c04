//! Snapshot projection into the active and history views

use std::cmp::Reverse;

use serde::Serialize;

use crate::error::FeedError;
use crate::models::{AlertRecord, AlertSnapshot};
use crate::state::{FeedState, ViewFreshness};

/// Views derived from one snapshot.
///
/// Both are sorted newest first. Equal timestamps keep ascending id order, so
/// projecting the same snapshot twice always yields the same sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertViews {
    /// Unacknowledged records
    pub active: Vec<AlertRecord>,
    /// Every record
    pub history: Vec<AlertRecord>,
}

/// Recompute both views from scratch.
pub fn project(snapshot: &AlertSnapshot) -> AlertViews {
    let mut history = snapshot.records().cloned().collect::<Vec<_>>();
    // Stable sort over id-ordered input.
    history.sort_by_key(|record| Reverse(record.timestamp));

    let active = history
        .iter()
        .filter(|record| !record.acknowledged)
        .cloned()
        .collect();

    AlertViews { active, history }
}

/// Holds the last good views and their freshness.
#[derive(Debug, Default)]
pub struct AlertProjector {
    views: AlertViews,
    freshness: ViewFreshness,
}

impl AlertProjector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the views with a projection of `snapshot`.
    pub fn apply_snapshot(&mut self, snapshot: &AlertSnapshot, received_at: i64) -> &AlertViews {
        self.views = project(snapshot);
        self.freshness = ViewFreshness {
            state: FeedState::Live,
            last_snapshot_at: Some(received_at),
            last_error: None,
        };
        tracing::debug!(
            active = self.views.active.len(),
            history = self.views.history.len(),
            "projected alert snapshot"
        );
        &self.views
    }

    /// Record a feed failure. The current views stay authoritative.
    pub fn record_failure(&mut self, error: &FeedError) {
        tracing::warn!("alert feed delivery failed: {}", error);
        self.freshness.state = FeedState::Stale;
        self.freshness.last_error = Some(error.to_string());
    }

    #[must_use]
    pub const fn views(&self) -> &AlertViews {
        &self.views
    }

    #[must_use]
    pub const fn freshness(&self) -> &ViewFreshness {
        &self.freshness
    }
}
