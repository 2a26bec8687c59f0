//! Where the camera should look, and how it gets there.

use glam::DVec3;

use crate::api::types::{find_body, BodyState};
use crate::catalog::bodies::EARTH;
use crate::core::scene::ScenePhase;
use crate::core::selection::Selection;
use crate::extensions::easing::{ease_dvec3, Easing};
use crate::renderer::camera::Camera3D;

/// Aspect framing: distance per unit of separation between the two bodies.
pub const ASPECT_FRAMING: f64 = 1.6;
/// Pattern framing: distance per unit of the widest body's offset from the centroid.
pub const PATTERN_FRAMING: f64 = 3.5;
/// Closest framing for multi-body selections.
pub const MIN_GROUP_DISTANCE: f64 = 4.0;

pub const DEFAULT_FLIGHT_DURATION: f64 = 0.85;
pub const DEFAULT_RETARGET_EPSILON: f64 = 0.001;

/// A look-at point and, for group selections, an explicit viewing distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyTarget {
    pub position: DVec3,
    /// `None` means the caller picks a default from the focused body's size.
    pub distance: Option<f64>,
}

impl FlyTarget {
    /// Same target within `epsilon` on every axis and on the distance.
    pub fn approx_eq(&self, other: &FlyTarget, epsilon: f64) -> bool {
        let d = (self.position - other.position).abs();
        let same_position = d.x <= epsilon && d.y <= epsilon && d.z <= epsilon;
        let same_distance = match (self.distance, other.distance) {
            (None, None) => true,
            (Some(a), Some(b)) => (a - b).abs() <= epsilon,
            _ => false,
        };
        same_position && same_distance
    }
}

/// The single body a target frames, when there is one.
pub fn focus_key(phase: ScenePhase, selection: &Selection) -> Option<&str> {
    match phase {
        ScenePhase::FlyToEarth => Some(EARTH),
        ScenePhase::Orrery => selection.planet_key(),
        _ => None,
    }
}

/// Derive the fly target from phase, selection and the latest positions.
/// Unknown keys and phases without camera movement give `None`.
pub fn resolve(phase: ScenePhase, selection: &Selection, states: &[BodyState]) -> Option<FlyTarget> {
    match phase {
        ScenePhase::FlyToEarth => find_body(states, EARTH).map(|s| FlyTarget {
            position: s.position,
            distance: None,
        }),
        ScenePhase::Orrery => resolve_selection(selection, states),
        _ => None,
    }
}

fn resolve_selection(selection: &Selection, states: &[BodyState]) -> Option<FlyTarget> {
    match selection {
        Selection::None => None,
        Selection::Planet { key } => find_body(states, key).map(|s| FlyTarget {
            position: s.position,
            distance: None,
        }),
        Selection::Aspect { body1, body2, .. } => {
            let a = find_body(states, body1)?.position;
            let b = find_body(states, body2)?.position;
            Some(FlyTarget {
                position: (a + b) * 0.5,
                distance: Some((a.distance(b) * ASPECT_FRAMING).max(MIN_GROUP_DISTANCE)),
            })
        }
        Selection::Pattern { bodies, .. } => {
            if bodies.is_empty() {
                return None;
            }
            let points = bodies
                .iter()
                .map(|k| find_body(states, k).map(|s| s.position))
                .collect::<Option<Vec<_>>>()?;
            let centroid = points.iter().copied().sum::<DVec3>() / points.len() as f64;
            let spread = points.iter().map(|p| p.distance(centroid)).fold(0.0, f64::max);
            Some(FlyTarget {
                position: centroid,
                distance: Some((spread * PATTERN_FRAMING).max(MIN_GROUP_DISTANCE)),
            })
        }
    }
}

/// Result of advancing the controller by one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightStatus {
    Idle,
    InFlight,
    /// Returned on the single frame a flight reaches its end.
    Completed,
}

#[derive(Debug, Clone, Copy)]
struct Flight {
    start: Camera3D,
    end: Camera3D,
    /// Eye direction from the target, fixed when the flight starts.
    direction: DVec3,
    progress: f64,
}

/// Eases the camera toward fly targets.
///
/// A target is either new (first after [`reset`](Self::reset) or after `None`), in which
/// case a flight starts, or the same subject seen at a new position, in which case the
/// camera keeps tracking it without restarting.
#[derive(Debug, Clone)]
pub struct CameraFlightController {
    duration: f64,
    easing: Easing,
    epsilon: f64,
    applied: Option<FlyTarget>,
    flight: Option<Flight>,
}

impl CameraFlightController {
    pub fn new(duration: f64, easing: Easing, epsilon: f64) -> Self {
        Self {
            duration: if duration > 0.0 { duration } else { DEFAULT_FLIGHT_DURATION },
            easing,
            epsilon: epsilon.max(0.0),
            applied: None,
            flight: None,
        }
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Normalized progress of the current flight, 0 when idle.
    pub fn progress(&self) -> f64 {
        self.flight.map(|f| f.progress).unwrap_or(0.0)
    }

    pub fn applied_target(&self) -> Option<&FlyTarget> {
        self.applied.as_ref()
    }

    /// The subject changed: the next target starts a fresh flight.
    pub fn reset(&mut self) {
        self.applied = None;
    }

    /// Feed the latest resolved target. Returns true when a new flight starts.
    ///
    /// A new target starts a flight from wherever the camera is now, even mid-flight.
    /// A moved target shifts the end of the current flight and keeps its progress, or
    /// carries an idle camera along by the same offset. Moves within epsilon are ignored.
    /// `default_distance` is used when the target has none.
    pub fn retarget(&mut self, target: Option<FlyTarget>, default_distance: f64, camera: &mut Camera3D) -> bool {
        let Some(target) = target else {
            self.applied = None;
            return false;
        };
        let distance = target.distance.unwrap_or(default_distance);

        let Some(prev) = self.applied else {
            let direction = camera.view_direction();
            let end = Camera3D::new(target.position + direction * distance, target.position);
            log::debug!("Camera flight to {:?} at distance {:.3}", target.position, distance);
            self.flight = Some(Flight { start: *camera, end, direction, progress: 0.0 });
            self.applied = Some(target);
            return true;
        };
        if prev.approx_eq(&target, self.epsilon) {
            return false;
        }

        match self.flight.as_mut() {
            Some(flight) => {
                flight.end = Camera3D::new(target.position + flight.direction * distance, target.position);
            }
            None => {
                let delta = target.position - prev.position;
                camera.position += delta;
                camera.target += delta;
            }
        }
        self.applied = Some(target);
        false
    }

    /// Advance the current flight by `dt` seconds and write the eased pose into `camera`.
    pub fn advance(&mut self, dt: f64, camera: &mut Camera3D) -> FlightStatus {
        let Some(flight) = self.flight.as_mut() else {
            return FlightStatus::Idle;
        };
        flight.progress = (flight.progress + dt.max(0.0) / self.duration).clamp(0.0, 1.0);
        if flight.progress >= 1.0 {
            *camera = flight.end;
            self.flight = None;
            log::debug!("Camera flight complete");
            return FlightStatus::Completed;
        }
        camera.position = ease_dvec3(flight.start.position, flight.end.position, flight.progress, self.easing);
        camera.target = ease_dvec3(flight.start.target, flight.end.target, flight.progress, self.easing);
        FlightStatus::InFlight
    }
}

impl Default for CameraFlightController {
    fn default() -> Self {
        Self::new(DEFAULT_FLIGHT_DURATION, Easing::QuadInOut, DEFAULT_RETARGET_EPSILON)
    }
}
