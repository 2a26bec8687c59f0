//! Sidereal time for orienting the night sky.

use std::f64::consts::PI;

use crate::orbit::kepler::normalize_degrees;

/// Greenwich mean sidereal time (degrees) for `days` since J2000.
pub fn gmst_deg(days: f64) -> f64 {
    normalize_degrees(280.46061837 + 360.98564736629 * days)
}

/// Local sidereal time (degrees) at an east-positive observer longitude.
pub fn lst_deg(days: f64, longitude_deg: f64) -> f64 {
    normalize_degrees(gmst_deg(days) + longitude_deg)
}

/// Rotation of the sky group about display +y (radians) that brings the local meridian to the viewer.
pub fn sky_rotation_y(days: f64, longitude_deg: f64) -> f64 {
    PI - lst_deg(days, longitude_deg).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmst_at_j2000() {
        assert!((gmst_deg(0.0) - 280.46061837).abs() < 1e-9);
    }

    #[test]
    fn one_sidereal_day_later_is_same_gmst() {
        let sidereal_day = 360.0 / 360.98564736629;
        assert!((gmst_deg(sidereal_day) - gmst_deg(0.0)).abs() < 1e-6);
    }

    #[test]
    fn lst_adds_longitude() {
        let lst = lst_deg(0.0, -74.006);
        assert!((lst - (280.46061837 - 74.006)).abs() < 1e-9);
        assert!((0.0..360.0).contains(&lst_deg(1234.5, 179.9)));
    }

    #[test]
    fn rotation_is_pi_minus_lst() {
        let days = 8765.4;
        let r = sky_rotation_y(days, 10.0);
        assert!((r - (PI - lst_deg(days, 10.0).to_radians())).abs() < 1e-12);
    }
}
