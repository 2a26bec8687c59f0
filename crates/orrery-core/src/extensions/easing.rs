// extensions/easing.rs
//
// Easing curves for camera flights.
// Pure math over f64 progress values, no scene state.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to normalized flight progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    /// Constant velocity.
    Linear,
    QuadIn,
    QuadOut,
    /// Slow start and end. Default for camera flights.
    #[default]
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Symmetric smoothstep on a half cosine.
    SineInOut,
}

impl Easing {
    /// Apply the curve to `t`, clamped to [0, 1].
    /// Every variant maps 0 to 0 and 1 to 1.
    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Linearly interpolate between two points.
#[inline]
pub fn lerp_dvec3(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a + (b - a) * t
}

/// Interpolate points with easing.
#[inline]
pub fn ease_dvec3(a: DVec3, b: DVec3, t: f64, easing: Easing) -> DVec3 {
    lerp_dvec3(a, b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Easing; 6] = [
        Easing::Linear,
        Easing::QuadIn,
        Easing::QuadOut,
        Easing::QuadInOut,
        Easing::CubicInOut,
        Easing::SineInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for easing in ALL {
            assert!(easing.apply(0.0).abs() < 1e-12, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{:?} at 1", easing);
        }
    }

    #[test]
    fn quad_in_out_matches_piecewise_form() {
        let e = Easing::QuadInOut;
        assert!((e.apply(0.25) - 0.125).abs() < 1e-12);
        assert!((e.apply(0.5) - 0.5).abs() < 1e-12);
        assert!((e.apply(0.75) - 0.875).abs() < 1e-12);
    }

    #[test]
    fn in_out_curves_are_symmetric() {
        for easing in [Easing::QuadInOut, Easing::CubicInOut, Easing::SineInOut] {
            for i in 0..=10 {
                let t = i as f64 / 10.0;
                let sum = easing.apply(t) + easing.apply(1.0 - t);
                assert!((sum - 1.0).abs() < 1e-12, "{:?} at {}", easing, t);
            }
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::QuadIn.apply(-1.0), 0.0);
        assert_eq!(Easing::QuadIn.apply(2.0), 1.0);
    }

    #[test]
    fn ease_dvec3_uses_curve() {
        let a = DVec3::ZERO;
        let b = DVec3::new(10.0, 0.0, 0.0);
        let mid = ease_dvec3(a, b, 0.25, Easing::QuadInOut);
        assert!((mid.x - 1.25).abs() < 1e-12);
    }

    #[test]
    fn parses_kebab_case_names() {
        let e: Easing = serde_json::from_str("\"cubic-in-out\"").unwrap();
        assert_eq!(e, Easing::CubicInOut);
    }
}
