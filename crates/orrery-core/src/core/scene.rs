use serde::{Deserialize, Serialize};

use crate::catalog::bodies::EARTH;
use crate::core::selection::Selection;

/// Which view is active or in transition. Starts in `Orrery` and cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenePhase {
    #[default]
    Orrery,
    FlyToEarth,
    FadeToSky,
    Sky,
    FadeToOrrery,
}

impl ScenePhase {
    pub const ALL: [ScenePhase; 5] = [
        ScenePhase::Orrery,
        ScenePhase::FlyToEarth,
        ScenePhase::FadeToSky,
        ScenePhase::Sky,
        ScenePhase::FadeToOrrery,
    ];

    /// Numeric tag for the wire protocol, in declaration order.
    pub fn code(self) -> u32 {
        match self {
            ScenePhase::Orrery => 0,
            ScenePhase::FlyToEarth => 1,
            ScenePhase::FadeToSky => 2,
            ScenePhase::Sky => 3,
            ScenePhase::FadeToOrrery => 4,
        }
    }
}

/// The two views a user can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    Orrery,
    Sky,
}

/// Things that can move the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneTrigger {
    /// The user asked for a view.
    RequestView(ViewMode),
    /// The camera flight reached its target.
    FlightComplete,
    /// The rendering layer finished a fade it owns.
    FadeComplete,
}

impl SceneTrigger {
    pub const ALL: [SceneTrigger; 4] = [
        SceneTrigger::RequestView(ViewMode::Orrery),
        SceneTrigger::RequestView(ViewMode::Sky),
        SceneTrigger::FlightComplete,
        SceneTrigger::FadeComplete,
    ];
}

/// The transition table. `None` means the trigger is ignored in this phase.
pub fn next_phase(phase: ScenePhase, trigger: SceneTrigger, earth_available: bool) -> Option<ScenePhase> {
    use ScenePhase::*;
    match (phase, trigger) {
        (Orrery, SceneTrigger::RequestView(ViewMode::Sky)) => {
            Some(if earth_available { FlyToEarth } else { FadeToSky })
        }
        (FlyToEarth, SceneTrigger::FlightComplete) => Some(FadeToSky),
        (FadeToSky, SceneTrigger::FadeComplete) => Some(Sky),
        (Sky, SceneTrigger::RequestView(ViewMode::Orrery)) => Some(FadeToOrrery),
        (FadeToSky, SceneTrigger::RequestView(ViewMode::Orrery)) => Some(FadeToOrrery),
        (FadeToOrrery, SceneTrigger::FadeComplete) => Some(Orrery),
        _ => None,
    }
}

/// Renderer-facing flags derived from the phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SceneVisibility {
    /// Orrery content is faded out and ignores pointer input.
    pub orrery_faded: bool,
    /// Sky content is faded in.
    pub sky_visible: bool,
    /// Sky content receives pointer input.
    pub sky_interactive: bool,
    /// Sky-only overlays may show at full opacity.
    pub settled: bool,
}

impl SceneVisibility {
    pub fn for_phase(phase: ScenePhase) -> Self {
        let sky_side = matches!(phase, ScenePhase::FadeToSky | ScenePhase::Sky);
        let in_sky = phase == ScenePhase::Sky;
        Self {
            orrery_faded: sky_side,
            sky_visible: sky_side,
            sky_interactive: in_sky,
            settled: in_sky,
        }
    }

    /// Packed as bit flags in field order, for the frame header.
    pub fn bits(&self) -> u32 {
        (self.orrery_faded as u32)
            | (self.sky_visible as u32) << 1
            | (self.sky_interactive as u32) << 2
            | (self.settled as u32) << 3
    }
}

/// Everything the reducer acts on.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Trigger(SceneTrigger),
    /// Replace the selection. `Selection::None` deselects.
    Select(Selection),
}

/// Phase plus selection. Mutated only through [`ViewState::reduce`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ViewState {
    pub phase: ScenePhase,
    pub selection: Selection,
}

impl ViewState {
    /// Apply one event and return the next state.
    pub fn reduce(&self, event: &ViewEvent, earth_available: bool) -> ViewState {
        match event {
            ViewEvent::Select(selection) => ViewState {
                phase: self.phase,
                selection: selection.clone(),
            },
            ViewEvent::Trigger(trigger) => {
                let Some(next) = next_phase(self.phase, *trigger, earth_available) else {
                    return self.clone();
                };
                let selection = match (self.phase, next) {
                    (_, ScenePhase::FlyToEarth) => Selection::planet(EARTH),
                    (ScenePhase::FlyToEarth, ScenePhase::FadeToSky) => Selection::None,
                    (ScenePhase::FadeToOrrery, ScenePhase::Orrery) => Selection::None,
                    _ => self.selection.clone(),
                };
                ViewState { phase: next, selection }
            }
        }
    }
}

/// Owns the view state and reports phase changes.
#[derive(Debug, Clone, Default)]
pub struct SceneTransitionMachine {
    state: ViewState,
}

impl SceneTransitionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> ScenePhase {
        self.state.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.state.selection
    }

    pub fn visibility(&self) -> SceneVisibility {
        SceneVisibility::for_phase(self.state.phase)
    }

    /// Apply an event. Returns true when the phase changed.
    pub fn dispatch(&mut self, event: ViewEvent, earth_available: bool) -> bool {
        let next = self.state.reduce(&event, earth_available);
        let changed = next.phase != self.state.phase;
        if changed {
            log::debug!("Scene phase {:?} -> {:?}", self.state.phase, next.phase);
        } else if let ViewEvent::Trigger(trigger) = event {
            log::debug!("Ignoring {:?} in phase {:?}", trigger, self.state.phase);
        }
        self.state = next;
        changed
    }

    pub fn trigger(&mut self, trigger: SceneTrigger, earth_available: bool) -> bool {
        self.dispatch(ViewEvent::Trigger(trigger), earth_available)
    }

    pub fn select(&mut self, selection: Selection) {
        self.dispatch(ViewEvent::Select(selection), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sky_request_flies_to_earth_then_fades() {
        let mut machine = SceneTransitionMachine::new();
        assert_eq!(machine.phase(), ScenePhase::Orrery);
        assert!(machine.selection().is_none());

        assert!(machine.trigger(SceneTrigger::RequestView(ViewMode::Sky), true));
        assert_eq!(machine.phase(), ScenePhase::FlyToEarth);
        assert_eq!(machine.selection(), &Selection::planet("earth"));

        assert!(machine.trigger(SceneTrigger::FlightComplete, true));
        assert_eq!(machine.phase(), ScenePhase::FadeToSky);
        assert!(machine.selection().is_none());

        assert!(machine.trigger(SceneTrigger::FadeComplete, true));
        assert_eq!(machine.phase(), ScenePhase::Sky);
    }

    #[test]
    fn sky_request_without_earth_fades_directly() {
        let mut machine = SceneTransitionMachine::new();
        machine.trigger(SceneTrigger::RequestView(ViewMode::Sky), false);
        assert_eq!(machine.phase(), ScenePhase::FadeToSky);
    }

    #[test]
    fn return_to_orrery_clears_selection() {
        let mut machine = SceneTransitionMachine::new();
        machine.trigger(SceneTrigger::RequestView(ViewMode::Sky), false);
        machine.trigger(SceneTrigger::FadeComplete, true);
        machine.select(Selection::planet("mars"));
        machine.trigger(SceneTrigger::RequestView(ViewMode::Orrery), true);
        assert_eq!(machine.phase(), ScenePhase::FadeToOrrery);
        machine.trigger(SceneTrigger::FadeComplete, true);
        assert_eq!(machine.phase(), ScenePhase::Orrery);
        assert!(machine.selection().is_none());
    }

    #[test]
    fn orrery_request_during_fade_to_sky_reverses() {
        let mut machine = SceneTransitionMachine::new();
        machine.trigger(SceneTrigger::RequestView(ViewMode::Sky), false);
        machine.trigger(SceneTrigger::RequestView(ViewMode::Orrery), true);
        assert_eq!(machine.phase(), ScenePhase::FadeToOrrery);
    }

    #[test]
    fn duplicate_and_stray_completions_are_ignored() {
        let mut machine = SceneTransitionMachine::new();
        assert!(!machine.trigger(SceneTrigger::FadeComplete, true));
        assert!(!machine.trigger(SceneTrigger::FlightComplete, true));
        assert_eq!(machine.phase(), ScenePhase::Orrery);

        machine.trigger(SceneTrigger::RequestView(ViewMode::Sky), false);
        machine.trigger(SceneTrigger::FadeComplete, true);
        assert!(!machine.trigger(SceneTrigger::FadeComplete, true));
        assert_eq!(machine.phase(), ScenePhase::Sky);
    }

    #[test]
    fn transition_table_is_closed() {
        let allowed = [
            (ScenePhase::Orrery, ScenePhase::FlyToEarth),
            (ScenePhase::Orrery, ScenePhase::FadeToSky),
            (ScenePhase::FlyToEarth, ScenePhase::FadeToSky),
            (ScenePhase::FadeToSky, ScenePhase::Sky),
            (ScenePhase::Sky, ScenePhase::FadeToOrrery),
            (ScenePhase::FadeToSky, ScenePhase::FadeToOrrery),
            (ScenePhase::FadeToOrrery, ScenePhase::Orrery),
        ];
        for phase in ScenePhase::ALL {
            for trigger in SceneTrigger::ALL {
                for earth in [true, false] {
                    let state = ViewState { phase, selection: Selection::planet("mars") };
                    let next = state.reduce(&ViewEvent::Trigger(trigger), earth);
                    if next.phase != phase {
                        assert!(
                            allowed.contains(&(phase, next.phase)),
                            "{:?} --{:?}--> {:?}", phase, trigger, next.phase
                        );
                    } else {
                        assert_eq!(next, state, "no-op must leave state untouched");
                    }
                }
            }
        }
    }

    #[test]
    fn view_requests_matching_current_side_are_noops() {
        for (phase, mode) in [
            (ScenePhase::FadeToSky, ViewMode::Sky),
            (ScenePhase::Sky, ViewMode::Sky),
            (ScenePhase::Orrery, ViewMode::Orrery),
            (ScenePhase::FlyToEarth, ViewMode::Orrery),
            (ScenePhase::FlyToEarth, ViewMode::Sky),
        ] {
            assert_eq!(next_phase(phase, SceneTrigger::RequestView(mode), true), None);
        }
    }

    #[test]
    fn selecting_replaces_previous_kind() {
        let mut machine = SceneTransitionMachine::new();
        machine.select(Selection::aspect("mars", "venus", "Square"));
        machine.select(Selection::planet("jupiter"));
        assert_eq!(machine.selection(), &Selection::planet("jupiter"));
        machine.select(Selection::pattern("p1", ["sun", "moon", "mars"]));
        assert_eq!(machine.selection().kind_code(), 3);
        machine.select(Selection::aspect("sun", "moon", "Trine"));
        assert_eq!(machine.selection().kind_code(), 2);
        machine.select(Selection::None);
        assert!(machine.selection().is_none());
    }

    #[test]
    fn visibility_flags_per_phase() {
        let v = SceneVisibility::for_phase(ScenePhase::Orrery);
        assert_eq!(v, SceneVisibility::default());
        let v = SceneVisibility::for_phase(ScenePhase::FadeToSky);
        assert!(v.orrery_faded && v.sky_visible && !v.sky_interactive && !v.settled);
        let v = SceneVisibility::for_phase(ScenePhase::Sky);
        assert!(v.orrery_faded && v.sky_visible && v.sky_interactive && v.settled);
        assert_eq!(v.bits(), 0b1111);
        for phase in [ScenePhase::FlyToEarth, ScenePhase::FadeToOrrery] {
            assert_eq!(SceneVisibility::for_phase(phase).bits(), 0);
        }
    }
}
