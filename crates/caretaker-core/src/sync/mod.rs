//! Alert synchronization: projection, surface dispatch, and acknowledgement.

mod acknowledge;
mod dispatcher;
mod engine;
mod memory;
mod notifier;
mod projector;
mod remote;

pub use acknowledge::{AckOutcome, AcknowledgeCoordinator};
pub use dispatcher::{surface_for, DispatchReport, NotificationDispatcher, NotifiedSet};
pub use engine::AlertSyncEngine;
pub use memory::InMemoryAlertStore;
pub use notifier::{AlertSurface, Notifier, NotifierCall, RecordingNotifier, SurfaceId};
pub use projector::{project, AlertProjector, AlertViews};
pub use remote::{FeedEvent, RemoteAlertFeed, RemoteAlertStore};
