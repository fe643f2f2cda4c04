//! Feed freshness state shared by hosts.

use serde::Serialize;

/// Health of the remote alert feed as seen by the sync engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum FeedState {
    /// No snapshot received yet.
    Connecting,
    /// The latest feed event was a snapshot.
    Live,
    /// The feed reported a failure after which no snapshot arrived.
    Stale,
}

/// Staleness indicator for the derived views.
///
/// Views themselves are never cleared on failure; this only tells readers how
/// much to trust them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewFreshness {
    pub state: FeedState,
    /// Unix ms at which the last snapshot was projected.
    pub last_snapshot_at: Option<i64>,
    /// Message of the last feed failure, cleared by the next snapshot.
    pub last_error: Option<String>,
}

impl Default for ViewFreshness {
    fn default() -> Self {
        Self {
            state: FeedState::Connecting,
            last_snapshot_at: None,
            last_error: None,
        }
    }
}
