//! Conversions between the ecliptic, equatorial and display frames.
//!
//! Display frame: y is up (ecliptic north), the ecliptic plane is x/z.
//! Distances are compressed logarithmically so the outer planets fit on screen.

use glam::DVec3;

use crate::orbit::kepler::normalize_degrees;

/// Mean obliquity of the ecliptic at J2000 (degrees).
pub const OBLIQUITY_DEG: f64 = 23.4393;

/// Compress a true heliocentric distance (AU) to display units.
/// Strictly increasing for au > -0.5.
pub fn scale_orbit_radius(au: f64) -> f64 {
    2.0 + (au + 0.5).log2() * 3.0
}

/// Map an ecliptic vector (AU) into display space.
///
/// The vector is rescaled uniformly so its length becomes `scale_orbit_radius(|v|)`,
/// then remapped `(x, y, z) -> (x, z, -y)`. The origin stays at the origin.
pub fn ecliptic_to_display(ecliptic: DVec3) -> DVec3 {
    let raw = ecliptic.length();
    if raw <= 0.0 {
        return DVec3::ZERO;
    }
    let scaled = ecliptic * (scale_orbit_radius(raw) / raw);
    DVec3::new(scaled.x, scaled.z, -scaled.y)
}

/// Right ascension and declination, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in [0, 360).
    pub ra_deg: f64,
    /// Declination in [-90, 90].
    pub dec_deg: f64,
}

/// Equatorial coordinates of a point on the ecliptic (latitude 0) at `longitude_deg`.
pub fn ecliptic_to_equatorial(longitude_deg: f64) -> Equatorial {
    let lambda = longitude_deg.to_radians();
    let eps = OBLIQUITY_DEG.to_radians();
    let x = lambda.cos();
    let y = eps.cos() * lambda.sin();
    let z = eps.sin() * lambda.sin();
    Equatorial {
        ra_deg: normalize_degrees(y.atan2(x).to_degrees()),
        dec_deg: z.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}

/// Place an RA/Dec direction on a sphere of `radius` display units.
/// Celestial north is display +y; RA increases from +x toward -z.
pub fn equatorial_to_unit_sphere(ra_deg: f64, dec_deg: f64, radius: f64) -> DVec3 {
    let ra = ra_deg.to_radians();
    let dec = dec_deg.to_radians();
    DVec3::new(
        radius * dec.cos() * ra.cos(),
        radius * dec.sin(),
        -radius * dec.cos() * ra.sin(),
    )
}

/// A point on the display-space ecliptic plane at `longitude_deg` and `radius`.
pub fn ecliptic_plane_point(longitude_deg: f64, radius: f64) -> DVec3 {
    let lambda = longitude_deg.to_radians();
    DVec3::new(lambda.cos() * radius, 0.0, -lambda.sin() * radius)
}
