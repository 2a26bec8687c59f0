pub mod overlays;
pub mod positions;
pub mod sky;

pub use overlays::{
    aspect_lines, harmonic_lines, house_cusp_lines, pattern_lines, zodiac_markers, zodiac_ring, AspectLine,
    CuspLine, HarmonicLine, Segment, ZodiacArc, ZodiacMarker,
};
pub use positions::{PositionSampler, MOON_ORBIT_OFFSET, EARTH_DAILY_MOTION};
pub use sky::{place_sky_bodies, SkyBody, SkyDome, SkyLabel, StarPoint};
