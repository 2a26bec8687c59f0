//! Keplerian orbit solving. Pure math, no scene state.
//!
//! Angles cross the API in degrees and are converted to radians internally.
//! Everything stays f64 so that positions remain stable far from the epoch.

use glam::{DMat3, DVec3};
use serde::{Deserialize, Serialize};

/// Days per Julian year, used to turn orbital periods into mean motion.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Newton iteration cap. Solar-system eccentricities converge in a handful.
const MAX_ITERATIONS: usize = 50;

/// Stop once a Newton step is smaller than this (radians, ~6e-9 degrees).
const TOLERANCE_RAD: f64 = 1e-10;

/// Classical orbital elements referred to the J2000 ecliptic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis (AU).
    pub a: f64,
    /// Eccentricity, 0 <= e < 1.
    pub e: f64,
    /// Inclination (degrees).
    pub i: f64,
    /// Longitude of the ascending node (degrees).
    pub node: f64,
    /// Argument of perihelion (degrees).
    pub peri: f64,
    /// Mean anomaly at the epoch (degrees).
    pub m0: f64,
    /// Sidereal period (Julian years).
    pub period_years: f64,
}

impl OrbitalElements {
    /// Mean motion in degrees per day. A non-positive period yields a body that does not move.
    pub fn mean_motion(&self) -> f64 {
        if self.period_years > 0.0 {
            360.0 / (self.period_years * DAYS_PER_YEAR)
        } else {
            0.0
        }
    }

    /// Mean anomaly in [0, 360) after `days` since the epoch.
    pub fn mean_anomaly(&self, days: f64) -> f64 {
        normalize_degrees(self.m0 + self.mean_motion() * days)
    }

    /// Rotation from the perifocal frame (x toward perihelion) into the ecliptic frame.
    /// Node about z, then inclination about x, then perihelion about z: the 3-1-3 sequence.
    pub fn perifocal_to_ecliptic(&self) -> DMat3 {
        DMat3::from_rotation_z(self.node.to_radians())
            * DMat3::from_rotation_x(self.i.to_radians())
            * DMat3::from_rotation_z(self.peri.to_radians())
    }
}

/// Wrap an angle into [0, 360).
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg.rem_euclid(360.0);
    // Tiny negative inputs round up to exactly 360.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wrap an angle difference into [-180, 180).
pub fn signed_degrees(deg: f64) -> f64 {
    normalize_degrees(deg + 180.0) - 180.0
}

/// Solve Kepler's equation `M = E - e·sin(E)` for the eccentric anomaly.
/// Both anomalies in degrees. Newton-Raphson in radians.
///
/// If the iteration cap is hit the last estimate is returned as-is.
pub fn solve_kepler(mean_anomaly_deg: f64, eccentricity: f64) -> f64 {
    let m = mean_anomaly_deg.to_radians();
    let mut ea = if eccentricity < 0.8 { m } else { std::f64::consts::PI };
    for _ in 0..MAX_ITERATIONS {
        let delta = (ea - eccentricity * ea.sin() - m) / (1.0 - eccentricity * ea.cos());
        ea -= delta;
        if delta.abs() < TOLERANCE_RAD {
            return ea.to_degrees();
        }
    }
    log::warn!(
        "Kepler solver hit {} iterations (M={}, e={}), using last estimate",
        MAX_ITERATIONS, mean_anomaly_deg, eccentricity
    );
    ea.to_degrees()
}

/// True anomaly (degrees, [0, 360)) from the eccentric anomaly via the half-angle relation.
pub fn true_anomaly(eccentric_anomaly_deg: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly_deg.to_radians() / 2.0;
    let nu = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin())
            .atan2((1.0 - eccentricity).sqrt() * half.cos());
    normalize_degrees(nu.to_degrees())
}

/// Eccentric and true anomaly of a body at one instant, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anomalies {
    pub eccentric: f64,
    pub true_anomaly: f64,
}

/// Anomalies after `days` since the epoch.
pub fn anomalies(elements: &OrbitalElements, days: f64) -> Anomalies {
    anomalies_at_mean(elements, elements.mean_anomaly(days))
}

fn anomalies_at_mean(elements: &OrbitalElements, mean: f64) -> Anomalies {
    let eccentric = solve_kepler(mean, elements.e);
    Anomalies {
        eccentric,
        true_anomaly: true_anomaly(eccentric, elements.e),
    }
}

/// Position in the orbital plane (AU) for a given mean anomaly: x toward perihelion, z = 0.
pub fn perifocal_position(elements: &OrbitalElements, mean_anomaly_deg: f64) -> DVec3 {
    let an = anomalies_at_mean(elements, normalize_degrees(mean_anomaly_deg));
    let r = elements.a * (1.0 - elements.e * an.eccentric.to_radians().cos());
    let nu = an.true_anomaly.to_radians();
    DVec3::new(r * nu.cos(), r * nu.sin(), 0.0)
}

/// Heliocentric ecliptic position (AU) after `days` since the epoch.
pub fn heliocentric_position(elements: &OrbitalElements, days: f64) -> DVec3 {
    let plane = perifocal_position(elements, elements.mean_anomaly(days));
    elements.perifocal_to_ecliptic() * plane
}

/// Ecliptic longitude (degrees, [0, 360)) of a vector in the ecliptic frame.
pub fn ecliptic_longitude(v: DVec3) -> f64 {
    normalize_degrees(v.y.atan2(v.x).to_degrees())
}
