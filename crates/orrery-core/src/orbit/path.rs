use glam::DVec3;

use crate::coords::projector::ecliptic_to_display;
use crate::orbit::kepler::{perifocal_position, OrbitalElements};

/// Display-space polyline of a full orbit.
///
/// Sweeps mean anomaly uniformly through 360° in `samples` steps and returns
/// `samples + 1` points; the last point closes the loop onto the first.
/// Uniform mean anomaly gives denser points near aphelion, where the body moves slowest.
pub fn orbit_path(elements: &OrbitalElements, samples: usize) -> Vec<DVec3> {
    let samples = samples.max(3);
    let rotation = elements.perifocal_to_ecliptic();
    (0..=samples)
        .map(|k| {
            let mean = 360.0 * k as f64 / samples as f64;
            let plane = perifocal_position(elements, mean);
            ecliptic_to_display(rotation * plane)
        })
        .collect()
}
