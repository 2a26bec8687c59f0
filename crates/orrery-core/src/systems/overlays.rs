//! Line overlays derived from chart data (aspects, patterns, harmonics, house cusps)
//! and the fixed zodiac ring around the orrery.

use glam::DVec3;
use serde::Serialize;

use crate::api::types::{find_body, BodyState};
use crate::chart::harmonics::HarmonicCluster;
use crate::catalog::zodiac::{mid_sign_longitude, Element, SIGNS};
use crate::chart::service::{ChartSnapshot, PatternRecord};
use crate::coords::projector::ecliptic_plane_point;

/// Faintest an aspect line gets.
pub const MIN_ASPECT_OPACITY: f64 = 0.15;
/// Inner end of house cusp lines (display units).
pub const CUSP_INNER_RADIUS: f64 = 0.8;
/// Outer end of house cusp lines, just inside the zodiac ring.
pub const CUSP_OUTER_RADIUS: f64 = 21.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AspectLine {
    pub body1: String,
    pub body2: String,
    pub aspect: String,
    pub start: DVec3,
    pub end: DVec3,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub start: DVec3,
    pub end: DVec3,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuspLine {
    /// 1-based house number.
    pub house: u32,
    pub start: DVec3,
    pub end: DVec3,
    /// Houses 1, 4, 7 and 10.
    pub angular: bool,
    /// ASC / IC / DSC / MC for angular houses.
    pub label: Option<&'static str>,
}

/// Inner edge of the zodiac ring.
pub const ZODIAC_RING_RADIUS: f64 = 22.0;
pub const ZODIAC_RING_WIDTH: f64 = 0.8;
/// Sign glyphs float outside the ring.
pub const ZODIAC_SYMBOL_RADIUS: f64 = ZODIAC_RING_RADIUS + 6.0;
pub const ZODIAC_SEGMENTS_PER_SIGN: usize = 32;

/// Number of distinct harmonic colors; harmonic `h` uses `(h - 1) % 12`.
pub const HARMONIC_PALETTE_SIZE: u32 = 12;

/// A closed polyline through the bodies of one harmonic cluster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonicLine {
    pub harmonic: u32,
    pub color_index: u32,
    /// First point repeated at the end.
    pub points: Vec<DVec3>,
}

/// One 30-degree band of the zodiac ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZodiacArc {
    pub sign: &'static str,
    pub element: Element,
    /// Inner edge, increasing longitude.
    pub inner: Vec<DVec3>,
    /// Outer edge, increasing longitude.
    pub outer: Vec<DVec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZodiacMarker {
    pub sign: &'static str,
    pub symbol: &'static str,
    pub element: Element,
    pub position: DVec3,
}

/// Tighter aspects draw brighter.
pub fn aspect_opacity(orb: f64, default_orb: f64) -> f64 {
    if default_orb <= 0.0 {
        return MIN_ASPECT_OPACITY;
    }
    (1.0 - orb.abs() / default_orb).max(MIN_ASPECT_OPACITY)
}

/// One line per aspect whose bodies were both sampled.
pub fn aspect_lines(chart: &ChartSnapshot, states: &[BodyState]) -> Vec<AspectLine> {
    chart
        .aspects
        .iter()
        .filter_map(|a| {
            let p1 = find_body(states, &a.body1)?;
            let p2 = find_body(states, &a.body2)?;
            Some(AspectLine {
                body1: a.body1.clone(),
                body2: a.body2.clone(),
                aspect: a.aspect.clone(),
                start: p1.position,
                end: p2.position,
                opacity: aspect_opacity(a.orb, a.default_orb),
            })
        })
        .collect()
}

/// Every pair of the pattern's resolvable bodies.
pub fn pattern_lines(pattern: &PatternRecord, states: &[BodyState]) -> Vec<Segment> {
    let points: Vec<DVec3> = pattern
        .bodies
        .iter()
        .filter_map(|k| find_body(states, k).map(|s| s.position))
        .collect();
    let mut segments = Vec::new();
    for (i, &a) in points.iter().enumerate() {
        for &b in &points[i + 1..] {
            segments.push(Segment { start: a, end: b });
        }
    }
    segments
}

/// One closed shape per cluster with at least two sampled bodies.
pub fn harmonic_lines(clusters: &[HarmonicCluster], states: &[BodyState]) -> Vec<HarmonicLine> {
    clusters
        .iter()
        .filter_map(|c| {
            let mut points: Vec<DVec3> = c
                .bodies
                .iter()
                .filter_map(|k| find_body(states, k).map(|s| s.position))
                .collect();
            if points.len() < 2 {
                return None;
            }
            points.push(points[0]);
            Some(HarmonicLine {
                harmonic: c.harmonic,
                color_index: c.harmonic.saturating_sub(1) % HARMONIC_PALETTE_SIZE,
                points,
            })
        })
        .collect()
}

/// The twelve sign bands on the ecliptic plane, Aries from longitude 0.
pub fn zodiac_ring() -> Vec<ZodiacArc> {
    let edge = |start: f64, radius: f64| -> Vec<DVec3> {
        (0..=ZODIAC_SEGMENTS_PER_SIGN)
            .map(|j| {
                let t = j as f64 / ZODIAC_SEGMENTS_PER_SIGN as f64;
                ecliptic_plane_point(start + t * 30.0, radius)
            })
            .collect()
    };
    SIGNS
        .iter()
        .enumerate()
        .map(|(i, sign)| {
            let start = i as f64 * 30.0;
            ZodiacArc {
                sign: sign.name,
                element: sign.element,
                inner: edge(start, ZODIAC_RING_RADIUS),
                outer: edge(start, ZODIAC_RING_RADIUS + ZODIAC_RING_WIDTH),
            }
        })
        .collect()
}

/// Sign glyph positions at mid-sign longitudes.
pub fn zodiac_markers() -> Vec<ZodiacMarker> {
    SIGNS
        .iter()
        .enumerate()
        .map(|(i, sign)| ZodiacMarker {
            sign: sign.name,
            symbol: sign.symbol,
            element: sign.element,
            position: ecliptic_plane_point(mid_sign_longitude(i), ZODIAC_SYMBOL_RADIUS),
        })
        .collect()
}

fn angular_label(house: u32) -> Option<&'static str> {
    match house {
        1 => Some("ASC"),
        4 => Some("IC"),
        7 => Some("DSC"),
        10 => Some("MC"),
        _ => None,
    }
}

/// Radial cusp lines on the ecliptic plane.
pub fn house_cusp_lines(cusps: &[f64]) -> Vec<CuspLine> {
    cusps
        .iter()
        .enumerate()
        .map(|(i, &lon)| {
            let house = i as u32 + 1;
            let label = angular_label(house);
            CuspLine {
                house,
                start: ecliptic_plane_point(lon, CUSP_INNER_RADIUS),
                end: ecliptic_plane_point(lon, CUSP_OUTER_RADIUS),
                angular: label.is_some(),
                label,
            }
        })
        .collect()
}
