use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::catalog::bodies::{SATURN, SUN};

/// Direction used when the camera sits exactly on its target.
const FALLBACK_DIRECTION: DVec3 = DVec3::new(0.0, 0.6, 0.8);

/// Camera flight distance is this many body radii.
const DISTANCE_PER_SIZE: f64 = 10.0;
/// Closest any flight gets to a body.
const MIN_FLIGHT_DISTANCE: f64 = 1.2;
/// The sun is drawn with a corona.
const SUN_MIN_DISTANCE: f64 = 3.5;
/// Saturn needs room for its rings.
const SATURN_MIN_DISTANCE: f64 = 2.5;

/// Perspective orbit camera: an eye position looking at a target point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera3D {
    pub position: DVec3,
    pub target: DVec3,
}

impl Camera3D {
    pub fn new(position: DVec3, target: DVec3) -> Self {
        Self { position, target }
    }

    /// Unit vector from the target toward the eye.
    pub fn view_direction(&self) -> DVec3 {
        (self.position - self.target)
            .try_normalize()
            .unwrap_or(FALLBACK_DIRECTION.normalize())
    }

    pub fn distance(&self) -> f64 {
        self.position.distance(self.target)
    }
}

impl Default for Camera3D {
    /// Above and in front of the ecliptic, looking at the sun.
    fn default() -> Self {
        Self::new(DVec3::new(0.0, 20.0, 25.0), DVec3::ZERO)
    }
}

/// Viewing distance for a single body when the fly target carries none.
pub fn default_flight_distance(key: &str, size: f64) -> f64 {
    let base = (size * DISTANCE_PER_SIZE).max(MIN_FLIGHT_DISTANCE);
    match key {
        SUN => base.max(SUN_MIN_DISTANCE),
        SATURN => base.max(SATURN_MIN_DISTANCE),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_at_origin() {
        let cam = Camera3D::default();
        assert_eq!(cam.target, DVec3::ZERO);
        let d = cam.view_direction();
        assert!((d.length() - 1.0).abs() < 1e-12);
        assert!((d - DVec3::new(0.0, 0.6246950475544243, 0.7808688094430304)).length() < 1e-12);
    }

    #[test]
    fn degenerate_camera_uses_fallback_direction() {
        let cam = Camera3D::new(DVec3::ONE, DVec3::ONE);
        let d = cam.view_direction();
        assert!((d - DVec3::new(0.0, 0.6, 0.8)).length() < 1e-12);
    }

    #[test]
    fn default_distances() {
        assert!((default_flight_distance("sun", 0.5) - 5.0).abs() < 1e-12);
        assert!((default_flight_distance("sun", 0.1) - 3.5).abs() < 1e-12);
        assert!((default_flight_distance("saturn", 0.18) - 2.5).abs() < 1e-12);
        assert!((default_flight_distance("jupiter", 0.2) - 2.0).abs() < 1e-12);
        assert!((default_flight_distance("pluto", 0.06) - 1.2).abs() < 1e-12);
    }
}
