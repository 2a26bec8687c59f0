use chrono::{DateTime, Utc};
use glam::DVec3;

use crate::api::types::BodyState;
use crate::catalog::bodies::{EARTH, MOON, ORBITING_PLANETS, SUN};
use crate::catalog::BodyCatalog;
use crate::chart::service::{BodyMotion, ChartService};
use crate::coords::projector::ecliptic_to_display;
use crate::core::time::days_since_j2000;
use crate::orbit::kepler::{anomalies, heliocentric_position, normalize_degrees};

/// Display distance of the moon from the earth. Its real orbit is far too small to see at this scale.
pub const MOON_ORBIT_OFFSET: f64 = 0.4;

/// Earth's mean daily motion, used in place of its true rate.
pub const EARTH_DAILY_MOTION: f64 = 1.0;

/// Places every body for an instant.
///
/// Pure in the date: no caching, no randomness.
pub struct PositionSampler<'a> {
    catalog: &'a BodyCatalog,
    chart: &'a dyn ChartService,
    moon_offset: f64,
}

impl<'a> PositionSampler<'a> {
    pub fn new(catalog: &'a BodyCatalog, chart: &'a dyn ChartService) -> Self {
        Self {
            catalog,
            chart,
            moon_offset: MOON_ORBIT_OFFSET,
        }
    }

    pub fn with_moon_offset(mut self, offset: f64) -> Self {
        self.moon_offset = offset;
        self
    }

    /// Heliocentric display position of a body routed through the solver. Origin without elements.
    pub fn heliocentric_display(&self, key: &str, days: f64) -> DVec3 {
        match self.catalog.elements(key) {
            Some(el) => ecliptic_to_display(heliocentric_position(el, days)),
            None => {
                log::debug!("No orbital elements for '{}', placing at origin", key);
                DVec3::ZERO
            }
        }
    }

    /// Earth's display position, solved from the sun entry's elements.
    pub fn earth_display(&self, days: f64) -> DVec3 {
        self.heliocentric_display(SUN, days)
    }

    /// The moon, pushed out from the earth along its own orbital angle.
    pub fn moon_display(&self, days: f64, earth: DVec3) -> DVec3 {
        let Some(el) = self.catalog.elements(MOON) else {
            return earth;
        };
        let angle = normalize_degrees(el.node + el.peri + anomalies(el, days).true_anomaly).to_radians();
        earth + DVec3::new(angle.cos(), 0.0, angle.sin()) * self.moon_offset
    }

    fn motion(&self, key: &str, at: DateTime<Utc>) -> BodyMotion {
        self.chart.motion(key, at).unwrap_or_else(|| {
            log::debug!("No chart motion for '{}', using defaults", key);
            BodyMotion { longitude_deg: 0.0, retrograde: false, daily_motion_deg: 0.0 }
        })
    }

    fn state(&self, key: &str, position: DVec3, motion: BodyMotion) -> BodyState {
        let (name, symbol) = match self.catalog.get(key) {
            Some(desc) => (desc.name.clone(), desc.symbol.clone()),
            None => (key.to_string(), String::new()),
        };
        BodyState {
            key: key.to_string(),
            name,
            symbol,
            position,
            longitude_deg: motion.longitude_deg,
            retrograde: motion.retrograde,
            daily_motion_deg: motion.daily_motion_deg,
        }
    }

    /// Sun, earth, the orbiting planets innermost first, then the moon.
    pub fn sample_all(&self, at: DateTime<Utc>) -> Vec<BodyState> {
        let days = days_since_j2000(at);
        let mut states = Vec::with_capacity(ORBITING_PLANETS.len() + 3);

        let sun = self.motion(SUN, at);
        states.push(self.state(SUN, DVec3::ZERO, BodyMotion { retrograde: false, ..sun }));

        let earth = self.earth_display(days);
        states.push(self.state(EARTH, earth, BodyMotion {
            longitude_deg: normalize_degrees(sun.longitude_deg + 180.0),
            retrograde: false,
            daily_motion_deg: EARTH_DAILY_MOTION,
        }));

        for key in ORBITING_PLANETS {
            let position = self.heliocentric_display(key, days);
            states.push(self.state(key, position, self.motion(key, at)));
        }

        let moon = self.motion(MOON, at);
        states.push(self.state(MOON, self.moon_display(days, earth), BodyMotion { retrograde: false, ..moon }));

        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::KeplerianChart;
    use chrono::TimeZone;

    struct NoChart;

    impl ChartService for NoChart {
        fn motion(&self, _key: &str, _at: DateTime<Utc>) -> Option<BodyMotion> {
            None
        }
    }

    fn keys(states: &[BodyState]) -> Vec<&str> {
        states.iter().map(|s| s.key.as_str()).collect()
    }

    #[test]
    fn sun_sits_exactly_at_origin() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let at = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let states = PositionSampler::new(&catalog, &chart).sample_all(at);
        assert_eq!(states[0].key, "sun");
        assert_eq!(states[0].position, DVec3::ZERO);
    }

    #[test]
    fn covers_every_body_in_order() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let states = PositionSampler::new(&catalog, &chart).sample_all(at);
        assert_eq!(keys(&states), vec![
            "sun", "earth", "mercury", "venus", "mars", "jupiter",
            "saturn", "uranus", "neptune", "pluto", "moon",
        ]);
    }

    #[test]
    fn sampling_is_deterministic() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let sampler = PositionSampler::new(&catalog, &chart);
        let at = Utc.with_ymd_and_hms(1987, 10, 19, 14, 30, 0).unwrap();
        assert_eq!(sampler.sample_all(at), sampler.sample_all(at));
    }

    #[test]
    fn earth_is_opposite_the_sun() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let sampler = PositionSampler::new(&catalog, &chart);
        for year in [1850, 1969, 2000, 2024, 2150] {
            let at = Utc.with_ymd_and_hms(year, 7, 4, 6, 0, 0).unwrap();
            let states = sampler.sample_all(at);
            let expected = (states[0].longitude_deg + 180.0) % 360.0;
            assert!((states[1].longitude_deg - expected).abs() < 1e-9);
            assert!(!states[1].retrograde);
            assert_eq!(states[1].daily_motion_deg, EARTH_DAILY_MOTION);
        }
    }

    #[test]
    fn earth_display_longitude_matches_sun_opposite() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let at = Utc.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap();
        let states = PositionSampler::new(&catalog, &chart).sample_all(at);
        // Display z is -ecliptic y.
        let p = states[1].position;
        let lon = normalize_degrees((-p.z).atan2(p.x).to_degrees());
        let diff = (lon - states[1].longitude_deg + 540.0) % 360.0 - 180.0;
        assert!(diff.abs() < 0.01, "{lon} vs {}", states[1].longitude_deg);
    }

    #[test]
    fn moon_is_offset_from_earth() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let states = PositionSampler::new(&catalog, &chart).sample_all(at);
        let earth = states[1].position;
        let moon = states.last().unwrap();
        assert!(((moon.position - earth).length() - MOON_ORBIT_OFFSET).abs() < 1e-9);
        assert!(!moon.retrograde);
    }

    #[test]
    fn missing_elements_and_motion_degrade_to_defaults() {
        let catalog = BodyCatalog::from_json(r#"{ "bodies": [ { "key": "mars", "name": "Mars" } ] }"#).unwrap();
        let states = PositionSampler::new(&catalog, &NoChart)
            .sample_all(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(states.len(), 11);
        for s in &states {
            assert_eq!(s.position, DVec3::ZERO, "{}", s.key);
        }
        let mars = states.iter().find(|s| s.key == "mars").unwrap();
        assert_eq!(mars.name, "Mars");
        let pluto = states.iter().find(|s| s.key == "pluto").unwrap();
        assert_eq!(pluto.name, "pluto");
        assert_eq!(states[1].longitude_deg, 180.0);
    }

    #[test]
    fn planets_keep_distance_order() {
        let catalog = BodyCatalog::builtin();
        let chart = KeplerianChart::new(catalog.clone());
        let at = Utc.with_ymd_and_hms(2010, 5, 5, 0, 0, 0).unwrap();
        let states = PositionSampler::new(&catalog, &chart).sample_all(at);
        let r = |k: &str| states.iter().find(|s| s.key == k).unwrap().position.length();
        assert!(r("mercury") < r("venus"));
        assert!(r("venus") < r("earth"));
        assert!(r("earth") < r("mars"));
        assert!(r("mars") < r("jupiter"));
        assert!(r("jupiter") < r("saturn"));
    }
}
