use bytemuck::{Pod, Zeroable};
use glam::DVec3;
use serde::Serialize;

/// Scene-space coordinates after radius compression.
pub type Position3D = DVec3;

/// One body at one instant. Rebuilt on every sample; `key` is the only stable identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyState {
    pub key: String,
    pub name: String,
    pub symbol: String,
    pub position: Position3D,
    /// Geocentric ecliptic longitude in [0, 360).
    pub longitude_deg: f64,
    pub retrograde: bool,
    /// Degrees per day.
    pub daily_motion_deg: f64,
}

/// Find a body by key.
pub fn find_body<'a>(states: &'a [BodyState], key: &str) -> Option<&'a BodyState> {
    states.iter().find(|s| s.key == key)
}

/// Event forwarded to the host through the frame buffer.
/// `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct OrreryEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl OrreryEvent {
    pub const FLOATS: usize = 4;

    /// Scene phase changed. `a` = new phase code, `b` = previous phase code.
    pub const PHASE_CHANGED: f32 = 1.0;
    /// A camera flight finished. `a` = phase code at completion.
    pub const FLIGHT_COMPLETE: f32 = 2.0;
    /// Selection changed. `a` = selection kind code.
    pub const SELECTION_CHANGED: f32 = 3.0;
    /// Play state changed. `a` = 1 playing / 0 paused, `b` = speed.
    pub const PLAYBACK_CHANGED: f32 = 4.0;
    /// The chart inputs changed; an external engine should push a new snapshot.
    pub const CHART_REQUEST_CHANGED: f32 = 5.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
