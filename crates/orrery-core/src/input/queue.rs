use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::api::settings::{BirthChartRecord, SettingsPatch};
use crate::chart::service::ChartSnapshot;
use crate::core::scene::ViewMode;
use crate::core::selection::Selection;

/// Everything the host can ask of the orrery between frames.
#[derive(Debug, Clone)]
pub enum InputEvent {
    /// Click on a body, aspect line or pattern. `Selection::None` deselects.
    Select(Selection),
    /// A click that hit nothing.
    PointerMissed,
    /// View-mode toggle.
    RequestView(ViewMode),
    /// The host finished a fade it owns.
    FadeComplete,
    /// The user moved the camera with orbit controls.
    CameraMoved { position: DVec3, target: DVec3 },
    /// Signed day step.
    Step { days: f64 },
    Play,
    Pause,
    TogglePlay,
    /// Logarithmic speed slider, 0..=100.
    SetSpeedSlider { position: f64 },
    SetDate(DateTime<Utc>),
    UpdateSettings(SettingsPatch),
    /// Jump to a birth chart's instant and location and remember it.
    ApplyBirthChart(BirthChartRecord),
    /// Forget the birth chart. Date and location stay.
    ClearBirthChart,
    /// A chart computed by the external engine for the current request.
    SetChart(ChartSnapshot),
}

/// A queue of input events.
/// The host pushes; the orrery drains once at the start of each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Select(Selection::planet("mars")));
        q.push(InputEvent::Step { days: 1.0 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_order() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Play);
        q.push(InputEvent::RequestView(ViewMode::Sky));
        let kinds: Vec<_> = q.drain().iter().map(|e| matches!(e, InputEvent::Play)).collect();
        assert_eq!(kinds, vec![true, false]);
    }
}
