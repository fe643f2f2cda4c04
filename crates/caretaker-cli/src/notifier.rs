//! Terminal alert surface.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::Mutex;

use caretaker_core::classify::AlertCategory;
use caretaker_core::sync::{AlertSurface, Notifier, SurfaceId};
use caretaker_core::NotifierError;

const BELL: &str = "\x07";

/// Prints one line per raised surface and one per retraction.
///
/// Tracks which surfaces are showing, so repeated raises and retractions of
/// the same surface print nothing.
pub struct TerminalNotifier<W: Write + Send = io::Stdout> {
    inner: Mutex<TerminalState<W>>,
    bell: bool,
}

struct TerminalState<W> {
    out: W,
    visible: BTreeSet<SurfaceId>,
}

impl TerminalNotifier {
    pub fn stdout(bell: bool) -> Self {
        Self::new(io::stdout(), bell)
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    pub fn new(out: W, bell: bool) -> Self {
        Self {
            inner: Mutex::new(TerminalState {
                out,
                visible: BTreeSet::new(),
            }),
            bell,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, TerminalState<W>>, NotifierError> {
        self.inner
            .lock()
            .map_err(|_| NotifierError("terminal notifier poisoned".to_string()))
    }
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn raise(&self, surface: &AlertSurface) -> Result<(), NotifierError> {
        let mut state = self.lock()?;
        if state.visible.contains(&surface.surface_id) {
            return Ok(());
        }

        let bell = if self.bell && surface.category == AlertCategory::Urgent {
            BELL
        } else {
            ""
        };
        let line = format!(
            "{bell}{}  {}  [{}]",
            surface.title, surface.body, surface.alert_id
        );
        write_line(&mut state.out, &line)?;
        state.visible.insert(surface.surface_id.clone());
        Ok(())
    }

    fn retract(&self, surface_id: &SurfaceId) -> Result<(), NotifierError> {
        let mut state = self.lock()?;
        if !state.visible.remove(surface_id) {
            return Ok(());
        }
        write_line(&mut state.out, &format!("cleared {surface_id}"))
    }
}

fn write_line(out: &mut impl Write, line: &str) -> Result<(), NotifierError> {
    writeln!(out, "{line}").map_err(|error| NotifierError(error.to_string()))?;
    out.flush().map_err(|error| NotifierError(error.to_string()))
}

#[cfg(test)]
impl TerminalNotifier<Vec<u8>> {
    fn written(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().out.clone()).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use caretaker_core::sync::surface_for;
    use caretaker_core::{AlertId, AlertRecord, AlertType};
    use pretty_assertions::assert_eq;

    use super::*;

    fn surface(id: &str, alert_type: AlertType) -> AlertSurface {
        surface_for(&AlertRecord {
            id: AlertId::parse(id).unwrap(),
            alert_type,
            acknowledged: false,
            timestamp: 1,
            device_id: None,
        })
    }

    #[test]
    fn raise_prints_once_per_surface() {
        let notifier = TerminalNotifier::new(Vec::new(), false);
        let fall = surface("a1", AlertType::FallDetected);

        notifier.raise(&fall).unwrap();
        notifier.raise(&fall).unwrap();

        assert_eq!(
            notifier.written(),
            "⚠️🆘 Fall Detected  Immediate attention required!  [a1]\n"
        );
    }

    #[test]
    fn bell_rings_only_for_urgent_alerts() {
        let notifier = TerminalNotifier::new(Vec::new(), true);
        notifier.raise(&surface("a1", AlertType::ShortHum)).unwrap();
        notifier.raise(&surface("a2", AlertType::ProlongedInactivity)).unwrap();

        let written = notifier.written();
        let lines = written.lines().collect::<Vec<_>>();
        assert!(!lines[0].starts_with(BELL));
        assert!(lines[1].starts_with(BELL));
    }

    #[test]
    fn retract_ignores_unknown_and_repeated_ids() {
        let notifier = TerminalNotifier::new(Vec::new(), false);
        let hum = surface("a1", AlertType::LongHum);
        notifier.raise(&hum).unwrap();

        notifier.retract(&SurfaceId::for_alert(&AlertId::parse("other").unwrap())).unwrap();
        notifier.retract(&hum.surface_id).unwrap();
        notifier.retract(&hum.surface_id).unwrap();

        let written = notifier.written();
        assert_eq!(written.matches("cleared alert/a1").count(), 1);
        assert!(!written.contains("other"));
    }
}
