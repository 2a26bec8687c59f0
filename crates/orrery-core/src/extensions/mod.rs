// extensions/mod.rs
//
// Optional helpers decoupled from the orrery pipeline.

pub mod easing;
pub mod rng;

pub use easing::{Easing, lerp, lerp_dvec3, ease_dvec3};
pub use rng::Rng;
