//! The night-sky view: a sphere of stars around the observer, rotated by local sidereal time.
//!
//! Everything here is in the unrotated sky frame (celestial north is +y, RA 0 is +x).
//! The host applies [`crate::coords::sidereal::sky_rotation_y`] to the whole group.

use std::f64::consts::TAU;

use glam::DVec3;
use serde::Serialize;

use crate::api::types::BodyState;
use crate::catalog::bodies::EARTH;
use crate::catalog::stars::StarCatalog;
use crate::catalog::zodiac::{mid_sign_longitude, SIGNS};
use crate::coords::projector::{ecliptic_to_equatorial, equatorial_to_unit_sphere, OBLIQUITY_DEG};
use crate::extensions::easing::lerp;
use crate::extensions::rng::Rng;
use crate::systems::overlays::Segment;

/// Bodies sit just inside the sky sphere so they draw over the stars.
pub const SKY_BODY_RADIUS_FACTOR: f64 = 0.97;
pub const CONSTELLATION_LINE_RADIUS_FACTOR: f64 = 0.999;
pub const CONSTELLATION_LABEL_RADIUS_FACTOR: f64 = 0.94;
pub const STAR_LABEL_RADIUS_FACTOR: f64 = 0.97;
pub const ZODIAC_LABEL_RADIUS_FACTOR: f64 = 0.91;
/// Segments in the ecliptic and equator circles.
pub const SKY_CIRCLE_SEGMENTS: usize = 256;

pub const DEFAULT_BACKGROUND_STARS: usize = 3500;
pub const DEFAULT_STAR_SEED: u64 = 42;

/// North galactic pole, J2000 (degrees).
const NGP_RA_DEG: f64 = 192.86;
const NGP_DEC_DEG: f64 = 27.13;

/// A body as seen on the night sky.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkyBody {
    pub key: String,
    pub ra_deg: f64,
    pub dec_deg: f64,
    /// Position inside the (unrotated) sky group.
    pub position: DVec3,
}

/// Place every sampled body except Earth on the sky sphere from its geocentric longitude.
pub fn place_sky_bodies(states: &[BodyState], sky_radius: f64) -> Vec<SkyBody> {
    let radius = sky_radius * SKY_BODY_RADIUS_FACTOR;
    states
        .iter()
        .filter(|s| s.key != EARTH)
        .map(|s| {
            let eq = ecliptic_to_equatorial(s.longitude_deg);
            SkyBody {
                key: s.key.clone(),
                ra_deg: eq.ra_deg,
                dec_deg: eq.dec_deg,
                position: equatorial_to_unit_sphere(eq.ra_deg, eq.dec_deg, radius),
            }
        })
        .collect()
}

/// Point size for a visual magnitude. Brighter stars are larger.
pub fn mag_to_size(vmag: f64) -> f64 {
    (5.5 * 10f64.powf(-vmag * 0.12)).max(0.4)
}

/// Approximate star color from the B-V index: hot blue through white and yellow to red.
pub fn bv_to_color(bv: f64) -> [u8; 3] {
    const BLUE: [f64; 3] = [155.0, 176.0, 255.0];
    const BLUE_WHITE: [f64; 3] = [170.0, 191.0, 255.0];
    const WHITE: [f64; 3] = [255.0, 255.0, 255.0];
    const YELLOW: [f64; 3] = [255.0, 224.0, 178.0];
    const ORANGE: [f64; 3] = [255.0, 180.0, 88.0];
    const RED: [f64; 3] = [255.0, 120.0, 38.0];

    let mix = |a: [f64; 3], b: [f64; 3], t: f64| [0, 1, 2].map(|i| lerp(a[i], b[i], t).round() as u8);

    if bv < -0.3 {
        BLUE.map(|c| c as u8)
    } else if bv < 0.0 {
        mix(BLUE, BLUE_WHITE, (bv + 0.3) / 0.3)
    } else if bv < 0.6 {
        mix(WHITE, YELLOW, bv / 0.6)
    } else if bv < 1.0 {
        mix(YELLOW, ORANGE, (bv - 0.6) / 0.4)
    } else if bv < 1.5 {
        mix(ORANGE, RED, (bv - 1.0) / 0.5)
    } else {
        RED.map(|c| c as u8)
    }
}

/// Galactic latitude (degrees) of an equatorial direction.
pub fn galactic_latitude(ra_deg: f64, dec_deg: f64) -> f64 {
    let (ngp_ra, ngp_dec) = (NGP_RA_DEG.to_radians(), NGP_DEC_DEG.to_radians());
    let dec = dec_deg.to_radians();
    let sin_b = dec.sin() * ngp_dec.sin() + dec.cos() * ngp_dec.cos() * (ra_deg.to_radians() - ngp_ra).cos();
    sin_b.clamp(-1.0, 1.0).asin().to_degrees()
}

/// A faint star as `(ra, dec, vmag)`.
pub type BackgroundStar = (f64, f64, f64);

/// Faint filler stars, denser toward the galactic plane. Deterministic in `seed`.
pub fn background_stars(count: usize, seed: u64) -> Vec<BackgroundStar> {
    let mut rng = Rng::new(seed);
    let mut stars = Vec::with_capacity(count);
    let mut attempts = 0;
    while stars.len() < count && attempts < count * 6 {
        attempts += 1;
        let ra = rng.range(0.0, 360.0);
        let dec = rng.range(-1.0, 1.0).asin().to_degrees();
        let plane_weight = (-galactic_latitude(ra, dec).abs() / 15.0).exp() * 2.0 + 0.5;
        if rng.next_f64() > plane_weight / 2.5 {
            continue;
        }
        stars.push((ra, dec, rng.range(4.0, 7.0)));
    }
    stars
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarPoint {
    pub position: DVec3,
    pub size: f64,
    pub color: [u8; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkyLabel {
    pub text: String,
    pub position: DVec3,
}

/// The date-independent part of the night sky, built once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkyDome {
    pub stars: Vec<StarPoint>,
    pub constellation_lines: Vec<Segment>,
    pub constellation_labels: Vec<SkyLabel>,
    pub star_labels: Vec<SkyLabel>,
    pub zodiac_labels: Vec<SkyLabel>,
    /// Closed loop, first point repeated.
    pub ecliptic: Vec<DVec3>,
    /// Closed loop, first point repeated.
    pub equator: Vec<DVec3>,
}

impl SkyDome {
    pub fn build(catalog: &StarCatalog, radius: f64, background: usize, seed: u64) -> Self {
        let catalog_stars = catalog.stars.iter().map(|s| (s.ra, s.dec, s.vmag, s.bv));
        let filler = background_stars(background, seed)
            .into_iter()
            .map(|(ra, dec, vmag)| (ra, dec, vmag, 0.5 + (vmag - 4.0) * 0.15));
        let stars = catalog_stars
            .chain(filler)
            .map(|(ra, dec, vmag, bv)| StarPoint {
                position: equatorial_to_unit_sphere(ra, dec, radius),
                size: mag_to_size(vmag),
                color: bv_to_color(bv),
            })
            .collect();

        let line_radius = radius * CONSTELLATION_LINE_RADIUS_FACTOR;
        let constellation_lines = catalog
            .constellations
            .iter()
            .flat_map(|c| &c.paths)
            .flat_map(|path| path.windows(2))
            .map(|pair| Segment {
                start: equatorial_to_unit_sphere(pair[0][0], pair[0][1], line_radius),
                end: equatorial_to_unit_sphere(pair[1][0], pair[1][1], line_radius),
            })
            .collect();

        let label = |text: &str, ra: f64, dec: f64, factor: f64| SkyLabel {
            text: text.to_string(),
            position: equatorial_to_unit_sphere(ra, dec, radius * factor),
        };
        let constellation_labels = catalog
            .constellations
            .iter()
            .map(|c| label(&c.name, c.label_ra, c.label_dec, CONSTELLATION_LABEL_RADIUS_FACTOR))
            .collect();
        let star_labels = catalog
            .named
            .iter()
            .map(|s| label(&s.name, s.ra, s.dec, STAR_LABEL_RADIUS_FACTOR))
            .collect();
        let zodiac_labels = SIGNS
            .iter()
            .enumerate()
            .map(|(i, sign)| {
                let eq = ecliptic_to_equatorial(mid_sign_longitude(i));
                label(sign.name, eq.ra_deg, eq.dec_deg, ZODIAC_LABEL_RADIUS_FACTOR)
            })
            .collect();

        Self {
            stars,
            constellation_lines,
            constellation_labels,
            star_labels,
            zodiac_labels,
            ecliptic: ecliptic_circle(radius),
            equator: equator_circle(radius),
        }
    }
}

/// The ecliptic on the sky sphere: the equator tilted by the obliquity about +x.
pub fn ecliptic_circle(radius: f64) -> Vec<DVec3> {
    let eps = OBLIQUITY_DEG.to_radians();
    circle(|t| {
        let lambda = t * TAU;
        let y = radius * lambda.sin();
        DVec3::new(radius * lambda.cos(), y * eps.sin(), -y * eps.cos())
    })
}

/// The celestial equator (declination 0).
pub fn equator_circle(radius: f64) -> Vec<DVec3> {
    circle(|t| {
        let ra = t * TAU;
        DVec3::new(radius * ra.cos(), 0.0, -radius * ra.sin())
    })
}

fn circle(point: impl Fn(f64) -> DVec3) -> Vec<DVec3> {
    (0..=SKY_CIRCLE_SEGMENTS)
        .map(|i| point(i as f64 / SKY_CIRCLE_SEGMENTS as f64))
        .collect()
}
