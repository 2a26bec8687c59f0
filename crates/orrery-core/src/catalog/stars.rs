//! Bright-star and constellation data for the night sky.
//!
//! Stars are a subset of the Yale Bright Star Catalogue (about vmag 3.5 and
//! brighter). Constellations are stick figures drawn between catalog stars.

use serde::Deserialize;

const STARS_JSON: &str = include_str!("../../data/stars.json");
const CONSTELLATIONS_JSON: &str = include_str!("../../data/constellations.json");

/// One catalog star. Coordinates are J2000 equatorial, in degrees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogStar {
    pub ra: f64,
    pub dec: f64,
    /// Visual magnitude.
    pub vmag: f64,
    /// B-V color index.
    pub bv: f64,
    #[serde(default)]
    pub name: String,
}

/// A star whose name is shown on the sky.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedStar {
    pub ra: f64,
    pub dec: f64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Constellation {
    pub name: String,
    pub label_ra: f64,
    pub label_dec: f64,
    /// Connected runs of `[ra, dec]` points.
    pub paths: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Deserialize)]
struct StarsFile {
    stars: Vec<CatalogStar>,
    #[serde(default)]
    named: Vec<NamedStar>,
}

#[derive(Debug, Deserialize)]
struct ConstellationsFile {
    constellations: Vec<Constellation>,
}

/// Everything drawn on the sky sphere that does not move with the date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarCatalog {
    pub stars: Vec<CatalogStar>,
    pub named: Vec<NamedStar>,
    pub constellations: Vec<Constellation>,
}

impl StarCatalog {
    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self, serde_json::Error> {
        Self::from_json(STARS_JSON, CONSTELLATIONS_JSON)
    }

    pub fn from_json(stars_json: &str, constellations_json: &str) -> Result<Self, serde_json::Error> {
        let stars: StarsFile = serde_json::from_str(stars_json)?;
        let constellations: ConstellationsFile = serde_json::from_str(constellations_json)?;
        log::debug!(
            "Star catalog: {} stars, {} named, {} constellations",
            stars.stars.len(),
            stars.named.len(),
            constellations.constellations.len()
        );
        Ok(Self {
            stars: stars.stars,
            named: stars.named,
            constellations: constellations.constellations,
        })
    }

    /// Number of constellation line segments.
    pub fn segment_count(&self) -> usize {
        self.constellations
            .iter()
            .flat_map(|c| &c.paths)
            .map(|p| p.len().saturating_sub(1))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = StarCatalog::builtin().unwrap();
        assert_eq!(catalog.stars.len(), 186);
        assert_eq!(catalog.named.len(), 53);
        assert_eq!(catalog.constellations.len(), 30);
        let sirius = &catalog.stars[0];
        assert!(sirius.name.starts_with("Sirius"));
        assert!((sirius.vmag + 1.46).abs() < 1e-12);
        assert!(catalog.constellations.iter().any(|c| c.name == "Orion"));
    }

    #[test]
    fn coordinates_are_in_range() {
        let catalog = StarCatalog::builtin().unwrap();
        for s in &catalog.stars {
            assert!((0.0..360.0).contains(&s.ra), "{}", s.name);
            assert!((-90.0..=90.0).contains(&s.dec), "{}", s.name);
        }
        for c in &catalog.constellations {
            assert!(c.paths.iter().all(|p| p.len() >= 2), "{}", c.name);
        }
    }

    #[test]
    fn parse_minimal_catalog() {
        let catalog = StarCatalog::from_json(
            r#"{ "stars": [ { "ra": 10, "dec": 20, "vmag": 1, "bv": 0.5 } ] }"#,
            r#"{ "constellations": [ { "name": "Tri", "label_ra": 0, "label_dec": 0,
                 "paths": [ [[0, 0], [10, 0], [10, 10]], [[0, 0], [10, 10]] ] } ] }"#,
        )
        .unwrap();
        assert!(catalog.stars[0].name.is_empty());
        assert!(catalog.named.is_empty());
        assert_eq!(catalog.segment_count(), 3);
    }

    #[test]
    fn malformed_catalog_is_an_error() {
        assert!(StarCatalog::from_json("[]", r#"{ "constellations": [] }"#).is_err());
    }
}
