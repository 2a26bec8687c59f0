//! Harmonic charts: longitudes multiplied by `h` and folded back onto the circle.
//! Bodies that land close together in the `h`-th harmonic form a cluster.

use serde::{Deserialize, Serialize};

use crate::orbit::kepler::normalize_degrees;

/// Highest harmonic examined.
pub const MAX_HARMONIC: u32 = 12;
/// Bodies within this arc in the harmonic chart join the same cluster (degrees).
pub const HARMONIC_ORB_DEG: f64 = 8.0;

/// Bodies that fall together in one harmonic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarmonicCluster {
    pub harmonic: u32,
    pub bodies: Vec<String>,
}

/// How strongly a harmonic organizes the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HarmonicStrength {
    pub harmonic: u32,
    /// Mean resultant length of the harmonic angles, 0..=1.
    pub strength: f64,
    pub cluster_count: usize,
}

/// Clusters of two or more bodies in harmonic `h`.
///
/// Angles are sorted around the circle and split wherever the gap to the next
/// angle exceeds `orb_deg`. The groups on either side of 0° are merged.
pub fn harmonic_clusters(bodies: &[(&str, f64)], h: u32, orb_deg: f64) -> Vec<HarmonicCluster> {
    if h == 0 || bodies.len() < 2 {
        return Vec::new();
    }
    let mut angles: Vec<(f64, &str)> = bodies
        .iter()
        .filter(|(_, lon)| lon.is_finite())
        .map(|&(key, lon)| (normalize_degrees(lon * h as f64), key))
        .collect();
    angles.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut groups: Vec<Vec<&str>> = Vec::new();
    let mut prev: Option<f64> = None;
    for &(angle, key) in &angles {
        match (prev, groups.last_mut()) {
            (Some(p), Some(group)) if angle - p <= orb_deg => group.push(key),
            _ => groups.push(vec![key]),
        }
        prev = Some(angle);
    }

    if groups.len() > 1 {
        if let (Some(&(first, _)), Some(&(last, _))) = (angles.first(), angles.last()) {
            if first + 360.0 - last <= orb_deg {
                let mut merged = groups.pop().unwrap_or_default();
                merged.append(&mut groups[0]);
                groups[0] = merged;
            }
        }
    }

    groups
        .into_iter()
        .filter(|g| g.len() >= 2)
        .map(|g| HarmonicCluster {
            harmonic: h,
            bodies: g.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Clusters for every harmonic from 1 to `max_harmonic`.
pub fn all_harmonic_clusters(bodies: &[(&str, f64)], max_harmonic: u32, orb_deg: f64) -> Vec<HarmonicCluster> {
    (1..=max_harmonic)
        .flat_map(|h| harmonic_clusters(bodies, h, orb_deg))
        .collect()
}

/// Strength and cluster count per harmonic.
pub fn harmonic_spectrum(bodies: &[(&str, f64)], max_harmonic: u32, orb_deg: f64) -> Vec<HarmonicStrength> {
    (1..=max_harmonic)
        .map(|h| {
            let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
            for &(_, lon) in bodies.iter().filter(|(_, lon)| lon.is_finite()) {
                let a = (lon * h as f64).to_radians();
                sx += a.cos();
                sy += a.sin();
                n += 1;
            }
            let strength = if n == 0 { 0.0 } else { (sx * sx + sy * sy).sqrt() / n as f64 };
            HarmonicStrength {
                harmonic: h,
                strength,
                cluster_count: harmonic_clusters(bodies, h, orb_deg).len(),
            }
        })
        .collect()
}
