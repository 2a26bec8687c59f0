use serde::{Deserialize, Serialize};

use crate::orbit::kepler::OrbitalElements;

/// Static reference data for every body the orrery knows about.
/// Loaded from JSON or taken from the built-in default.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyManifest {
    /// Bodies in catalog order.
    pub bodies: Vec<BodyDescriptor>,
}

/// Describes a single body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    /// Stable join key (e.g. "mars").
    pub key: String,
    /// Display name.
    pub name: String,
    /// Glyph shown in labels.
    #[serde(default)]
    pub symbol: String,
    /// Display radius in scene units.
    #[serde(default = "default_size")]
    pub size: f64,
    /// Orbital elements. Axis points and Earth have none.
    #[serde(default)]
    pub elements: Option<OrbitalElements>,
}

fn default_size() -> f64 {
    0.1
}

impl BodyManifest {
    /// Parse a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_with_defaults() {
        let json = r#"{
            "bodies": [
                { "key": "mars", "name": "Mars", "symbol": "♂", "size": 0.09,
                  "elements": { "a": 1.52, "e": 0.093, "i": 1.85, "node": 49.6,
                                "peri": 286.5, "m0": 19.4, "period_years": 1.88 } },
                { "key": "northNode", "name": "North Node" }
            ]
        }"#;
        let manifest = BodyManifest::from_json(json).unwrap();
        assert_eq!(manifest.bodies.len(), 2);
        let mars = &manifest.bodies[0];
        assert_eq!(mars.symbol, "♂");
        assert!((mars.elements.unwrap().e - 0.093).abs() < 1e-12);
        let node = &manifest.bodies[1];
        assert_eq!(node.symbol, "");
        assert!((node.size - 0.1).abs() < 1e-12);
        assert!(node.elements.is_none());
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(BodyManifest::from_json("{ \"bodies\": [ { \"name\": 3 } ] }").is_err());
    }
}
