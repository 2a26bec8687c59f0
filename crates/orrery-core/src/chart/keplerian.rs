use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::catalog::bodies::{EARTH, MOON, SUN};
use crate::catalog::BodyCatalog;
use crate::chart::service::{BodyMotion, ChartService};
use crate::core::time::days_since_j2000;
use crate::orbit::kepler::{anomalies, ecliptic_longitude, heliocentric_position, normalize_degrees, signed_degrees};

/// Half-width of the central difference used for daily motion (days).
const HALF_DAY: f64 = 0.5;

/// Motion from the catalog's own orbital elements.
///
/// Good to a degree or so for the planets. Provides no aspects or houses.
#[derive(Debug, Clone, Default)]
pub struct KeplerianChart {
    catalog: BodyCatalog,
}

impl KeplerianChart {
    pub fn new(catalog: BodyCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BodyCatalog {
        &self.catalog
    }

    fn heliocentric(&self, key: &str, days: f64) -> Option<DVec3> {
        self.catalog.elements(key).map(|el| heliocentric_position(el, days))
    }

    /// Geocentric ecliptic longitude (degrees) of `key` at `days` since J2000.
    pub fn longitude(&self, key: &str, days: f64) -> Option<f64> {
        match key {
            EARTH => None,
            MOON => {
                let el = self.catalog.elements(MOON)?;
                let an = anomalies(el, days);
                Some(normalize_degrees(el.node + el.peri + an.true_anomaly))
            }
            _ => {
                // The sun entry holds Earth's heliocentric orbit.
                let earth = self.heliocentric(SUN, days)?;
                if key == SUN {
                    return Some(ecliptic_longitude(-earth));
                }
                let body = self.heliocentric(key, days)?;
                Some(ecliptic_longitude(body - earth))
            }
        }
    }
}

impl ChartService for KeplerianChart {
    fn motion(&self, key: &str, at: DateTime<Utc>) -> Option<BodyMotion> {
        let days = days_since_j2000(at);
        let longitude_deg = self.longitude(key, days)?;
        let before = self.longitude(key, days - HALF_DAY)?;
        let after = self.longitude(key, days + HALF_DAY)?;
        let daily_motion_deg = signed_degrees(after - before) / (2.0 * HALF_DAY);
        Some(BodyMotion {
            longitude_deg,
            retrograde: daily_motion_deg < 0.0,
            daily_motion_deg,
        })
    }
}
