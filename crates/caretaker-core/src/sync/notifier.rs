//! Local alert surface contract

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Mutex;

use crate::classify::AlertCategory;
use crate::error::NotifierError;
use crate::models::AlertId;

/// Address of a raised surface.
///
/// Derived one-to-one from the alert id, so the surface raised for an alert
/// can be retracted later without any lookup table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(String);

impl SurfaceId {
    #[must_use]
    pub fn for_alert(id: &AlertId) -> Self {
        Self(format!("alert/{id}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything a notifier needs to raise one surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertSurface {
    pub surface_id: SurfaceId,
    pub alert_id: AlertId,
    pub category: AlertCategory,
    pub title: String,
    pub body: String,
}

/// Caretaker-facing alert signal (sound, banner, terminal line).
///
/// Both operations must be idempotent and accept unknown ids.
pub trait Notifier: Send + Sync {
    fn raise(&self, surface: &AlertSurface) -> Result<(), NotifierError>;

    fn retract(&self, surface_id: &SurfaceId) -> Result<(), NotifierError>;
}

/// Calls observed by a [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Raise(AlertSurface),
    Retract(SurfaceId),
}

/// Notifier that keeps surfaces in memory and records every call.
///
/// Used by tests and headless hosts.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    inner: Mutex<RecordingState>,
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<NotifierCall>,
    visible: BTreeMap<SurfaceId, AlertSurface>,
    fail_raises: bool,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `raise` fail.
    pub fn fail_raises(&self, fail: bool) {
        if let Ok(mut state) = self.inner.lock() {
            state.fail_raises = fail;
        }
    }

    pub fn calls(&self) -> Vec<NotifierCall> {
        self.inner
            .lock()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Surfaces raised and not yet retracted
    pub fn visible(&self) -> Vec<AlertSurface> {
        self.inner
            .lock()
            .map(|state| state.visible.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn raise_count(&self, alert_id: &AlertId) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(call, NotifierCall::Raise(surface) if &surface.alert_id == alert_id)
            })
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn raise(&self, surface: &AlertSurface) -> Result<(), NotifierError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| NotifierError("recording notifier poisoned".to_string()))?;
        state.calls.push(NotifierCall::Raise(surface.clone()));
        if state.fail_raises {
            return Err(NotifierError("surface refused".to_string()));
        }
        state
            .visible
            .insert(surface.surface_id.clone(), surface.clone());
        Ok(())
    }

    fn retract(&self, surface_id: &SurfaceId) -> Result<(), NotifierError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| NotifierError("recording notifier poisoned".to_string()))?;
        state.calls.push(NotifierCall::Retract(surface_id.clone()));
        state.visible.remove(surface_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_id_is_derived_from_alert_id() {
        let id = AlertId::parse("-Nx1").unwrap();
        assert_eq!(SurfaceId::for_alert(&id), SurfaceId::for_alert(&id));
        assert_ne!(
            SurfaceId::for_alert(&id),
            SurfaceId::for_alert(&AlertId::parse("-Nx2").unwrap())
        );
        assert_eq!(SurfaceId::for_alert(&id).as_str(), "alert/-Nx1");
    }

    #[test]
    fn recording_notifier_retract_of_unknown_surface_is_ok() {
        let notifier = RecordingNotifier::new();
        let surface_id = SurfaceId::for_alert(&AlertId::parse("missing").unwrap());
        assert!(notifier.retract(&surface_id).is_ok());
        assert!(notifier.retract(&surface_id).is_ok());
        assert!(notifier.visible().is_empty());
    }
}
