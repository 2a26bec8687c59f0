use std::collections::HashMap;

use crate::catalog::bodies::{builtin_manifest, FALLBACK_SIZE, ORBITING_PLANETS};
use crate::catalog::manifest::{BodyDescriptor, BodyManifest};
use crate::orbit::kepler::OrbitalElements;

/// Keyed lookup over a body manifest. Read-only once built.
#[derive(Debug, Clone)]
pub struct BodyCatalog {
    bodies: Vec<BodyDescriptor>,
    index: HashMap<String, usize>,
}

impl BodyCatalog {
    /// Build a catalog from a parsed manifest. Later duplicates of a key win.
    pub fn from_manifest(manifest: BodyManifest) -> Self {
        let mut index = HashMap::with_capacity(manifest.bodies.len());
        for (i, desc) in manifest.bodies.iter().enumerate() {
            if index.insert(desc.key.clone(), i).is_some() {
                log::warn!("Duplicate catalog key '{}', keeping the last entry", desc.key);
            }
        }
        Self { bodies: manifest.bodies, index }
    }

    /// Parse a JSON manifest and index it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        BodyManifest::from_json(json).map(Self::from_manifest)
    }

    /// The built-in solar-system catalog.
    pub fn builtin() -> Self {
        Self::from_manifest(builtin_manifest())
    }

    pub fn get(&self, key: &str) -> Option<&BodyDescriptor> {
        self.index.get(key).map(|&i| &self.bodies[i])
    }

    pub fn elements(&self, key: &str) -> Option<&OrbitalElements> {
        self.get(key).and_then(|d| d.elements.as_ref())
    }

    /// Display size, or a small fallback for unknown keys.
    pub fn size(&self, key: &str) -> f64 {
        self.get(key).map(|d| d.size).unwrap_or(FALLBACK_SIZE)
    }

    /// Orbiting planets that this catalog can actually solve, innermost first.
    pub fn orbiting_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        ORBITING_PLANETS
            .iter()
            .copied()
            .filter(|key| self.elements(key).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodyDescriptor> {
        self.bodies.iter()
    }
}

impl Default for BodyCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::bodies::{EARTH, MARS, NORTH_NODE, SUN};

    #[test]
    fn builtin_has_every_sampled_body() {
        let catalog = BodyCatalog::builtin();
        assert!(catalog.get(SUN).is_some());
        assert!(catalog.get(EARTH).is_some());
        assert_eq!(catalog.orbiting_keys().count(), 8);
        assert!(catalog.elements(SUN).is_some());
        assert!(catalog.elements(EARTH).is_none());
        assert!(catalog.elements(NORTH_NODE).is_none());
    }

    #[test]
    fn builtin_elements_are_bound_orbits() {
        for desc in BodyCatalog::builtin().iter() {
            if let Some(el) = desc.elements {
                assert!(el.e >= 0.0 && el.e < 1.0, "{}", desc.key);
                assert!(el.period_years > 0.0, "{}", desc.key);
                assert!(el.a > 0.0, "{}", desc.key);
            }
        }
    }

    #[test]
    fn size_falls_back_for_unknown_keys() {
        let catalog = BodyCatalog::builtin();
        assert!((catalog.size(MARS) - 0.09).abs() < 1e-12);
        assert!((catalog.size("vulcan") - FALLBACK_SIZE).abs() < 1e-12);
    }

    #[test]
    fn orbiting_keys_skip_planets_without_elements() {
        let json = r#"{ "bodies": [
            { "key": "mars", "name": "Mars" },
            { "key": "venus", "name": "Venus",
              "elements": { "a": 0.72, "e": 0.0068, "i": 3.39, "node": 76.7,
                            "peri": 54.9, "m0": 50.4, "period_years": 0.615 } }
        ] }"#;
        let catalog = BodyCatalog::from_json(json).unwrap();
        let keys: Vec<_> = catalog.orbiting_keys().collect();
        assert_eq!(keys, vec!["venus"]);
    }
}
