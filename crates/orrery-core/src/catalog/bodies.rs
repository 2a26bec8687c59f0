/// Built-in body data: J2000 orbital elements and display properties.
///
/// Elements follow JPL's approximate planetary positions (Standish), converted from
/// longitude of perihelion / mean longitude to argument of perihelion / mean anomaly.
/// Display sizes are exaggerated for readability.

use crate::catalog::manifest::{BodyDescriptor, BodyManifest};
use crate::orbit::kepler::OrbitalElements;

pub const SUN: &str = "sun";
pub const EARTH: &str = "earth";
pub const MOON: &str = "moon";
pub const MERCURY: &str = "mercury";
pub const VENUS: &str = "venus";
pub const MARS: &str = "mars";
pub const JUPITER: &str = "jupiter";
pub const SATURN: &str = "saturn";
pub const URANUS: &str = "uranus";
pub const NEPTUNE: &str = "neptune";
pub const PLUTO: &str = "pluto";
pub const NORTH_NODE: &str = "northNode";
pub const SOUTH_NODE: &str = "southNode";

/// Planets placed through the orbit solver, innermost first. Earth is handled separately.
pub const ORBITING_PLANETS: [&str; 8] = [
    MERCURY, VENUS, MARS, JUPITER, SATURN, URANUS, NEPTUNE, PLUTO,
];

/// Display size used when a body is missing from the catalog.
pub const FALLBACK_SIZE: f64 = 0.1;

fn body(key: &str, name: &str, symbol: &str, size: f64, elements: Option<OrbitalElements>) -> BodyDescriptor {
    BodyDescriptor {
        key: key.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        size,
        elements,
    }
}

fn el(a: f64, e: f64, i: f64, node: f64, peri: f64, m0: f64, period_years: f64) -> Option<OrbitalElements> {
    Some(OrbitalElements { a, e, i, node, peri, m0, period_years })
}

/// The default catalog shipped with the crate.
///
/// The sun entry carries Earth's heliocentric orbit: the sun's apparent geocentric
/// path is that orbit inverted, so one set of elements serves both bodies.
pub fn builtin_manifest() -> BodyManifest {
    BodyManifest {
        bodies: vec![
            body(SUN, "Sun", "☉", 0.5,
                el(1.00000261, 0.01671123, -0.00001531, 0.0, 102.93768193, 357.52688973, 1.0000174)),
            body(EARTH, "Earth", "⊕", 0.11, None),
            body(MOON, "Moon", "☽", 0.08,
                el(0.00256955529, 0.0549, 5.145, 125.08, 318.15, 134.963, 27.321582 / 365.25)),
            body(MERCURY, "Mercury", "☿", 0.08,
                el(0.38709927, 0.20563593, 7.00497902, 48.33076593, 29.12703035, 174.79252722, 0.2408467)),
            body(VENUS, "Venus", "♀", 0.1,
                el(0.72333566, 0.00677672, 3.39467605, 76.67984255, 54.92262463, 50.37663232, 0.61519726)),
            body(MARS, "Mars", "♂", 0.09,
                el(1.52371034, 0.09339410, 1.84969142, 49.55953891, 286.4968315, 19.39019754, 1.8808476)),
            body(JUPITER, "Jupiter", "♃", 0.2,
                el(5.20288700, 0.04838624, 1.30439695, 100.47390909, 274.25457074, 19.66796068, 11.862615)),
            body(SATURN, "Saturn", "♄", 0.18,
                el(9.53667594, 0.05386179, 2.48599187, 113.66242448, 338.93645383, 317.35536592, 29.447498)),
            body(URANUS, "Uranus", "⛢", 0.14,
                el(19.18916464, 0.04725744, 0.77263783, 74.01692503, 96.93735127, 142.28382821, 84.016846)),
            body(NEPTUNE, "Neptune", "♆", 0.14,
                el(30.06992276, 0.00859048, 1.77004347, 131.78422574, 273.18053653, 259.91520804, 164.79132)),
            body(PLUTO, "Pluto", "♇", 0.06,
                el(39.48211675, 0.24882730, 17.14001206, 110.30393684, 113.76497945, 14.86012204, 247.92065)),
            body(NORTH_NODE, "North Node", "☊", 0.05, None),
            body(SOUTH_NODE, "South Node", "☋", 0.05, None),
        ],
    }
}
