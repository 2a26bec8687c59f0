use bytemuck::{Pod, Zeroable};

use crate::api::types::BodyState;

/// Per-body data written to the frame buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Display-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Display radius.
    pub size: f32,
    /// Geocentric ecliptic longitude (degrees).
    pub longitude: f32,
    /// Degrees per day.
    pub daily_motion: f32,
    /// 1.0 when retrograde.
    pub retrograde: f32,
    /// 1.0 when part of the current selection.
    pub highlighted: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_state(state: &BodyState, size: f64, highlighted: bool) -> Self {
        Self {
            x: state.position.x as f32,
            y: state.position.y as f32,
            z: state.position.z as f32,
            size: size as f32,
            longitude: state.longitude_deg as f32,
            daily_motion: state.daily_motion_deg as f32,
            retrograde: if state.retrograde { 1.0 } else { 0.0 },
            highlighted: if highlighted { 1.0 } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn body_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<BodyInstance>(), 32);
        assert_eq!(BodyInstance::STRIDE_BYTES, 32);
    }

    #[test]
    fn from_state_packs_flags() {
        let state = BodyState {
            key: "mars".into(),
            name: "Mars".into(),
            symbol: "♂".into(),
            position: DVec3::new(1.0, 2.0, 3.0),
            longitude_deg: 123.0,
            retrograde: true,
            daily_motion_deg: -0.3,
        };
        let inst = BodyInstance::from_state(&state, 0.09, true);
        assert_eq!([inst.x, inst.y, inst.z], [1.0, 2.0, 3.0]);
        assert_eq!(inst.retrograde, 1.0);
        assert_eq!(inst.highlighted, 1.0);
        assert!((inst.size - 0.09).abs() < 1e-6);
    }
}
