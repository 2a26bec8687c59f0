pub mod projector;
pub mod sidereal;

pub use projector::{
    scale_orbit_radius, ecliptic_to_display, ecliptic_to_equatorial,
    equatorial_to_unit_sphere, ecliptic_plane_point, Equatorial, OBLIQUITY_DEG,
};
pub use sidereal::{gmst_deg, lst_deg, sky_rotation_y};
