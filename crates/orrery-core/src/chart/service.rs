//! The seam to the astrological engine.
//!
//! The orrery never computes aspects, patterns or houses itself. It asks a
//! [`ChartService`] for per-body motion and, optionally, for a full chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::harmonics::HarmonicCluster;

/// House division scheme passed through to the chart service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HouseSystem {
    #[default]
    WholeSign,
    Equal,
    Placidus,
    Porphyry,
}

/// Geocentric apparent motion of one body at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMotion {
    /// Ecliptic longitude in [0, 360).
    pub longitude_deg: f64,
    pub retrograde: bool,
    /// Signed degrees per day.
    pub daily_motion_deg: f64,
}

/// Inputs of a chart computation. A change in any field invalidates the cached chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub at: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub house_system: HouseSystem,
    pub major_aspects_only: bool,
}

/// One aspect between two bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectRecord {
    pub body1: String,
    pub body2: String,
    /// Aspect name, e.g. "Square".
    pub aspect: String,
    /// Deviation from exact (degrees).
    pub orb: f64,
    /// Allowed orb for this aspect type (degrees).
    pub default_orb: f64,
    #[serde(default)]
    pub applying: bool,
}

/// A detected configuration of several bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub id: String,
    pub name: String,
    pub bodies: Vec<String>,
}

/// The parts of a chart the orrery draws.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSnapshot {
    #[serde(default)]
    pub aspects: Vec<AspectRecord>,
    #[serde(default)]
    pub patterns: Vec<PatternRecord>,
    /// Cusp longitudes, house 1 first.
    #[serde(default)]
    pub house_cusps: Vec<f64>,
    /// Harmonic clusters from the engine. Empty means the orrery derives its own.
    #[serde(default)]
    pub harmonics: Vec<HarmonicCluster>,
}

impl ChartSnapshot {
    /// Parse a snapshot pushed by an external engine.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn pattern(&self, id: &str) -> Option<&PatternRecord> {
        self.patterns.iter().find(|p| p.id == id)
    }
}

/// The external astrological engine as seen from the orrery.
pub trait ChartService {
    /// Apparent geocentric motion of `key` at `at`, or `None` if unknown.
    fn motion(&self, key: &str, at: DateTime<Utc>) -> Option<BodyMotion>;

    /// Aspects, patterns and cusps for a request. Services that only know motion return `None`.
    fn chart(&self, _request: &ChartRequest) -> Option<ChartSnapshot> {
        None
    }
}
