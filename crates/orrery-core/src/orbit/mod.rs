pub mod kepler;
pub mod path;

pub use kepler::{
    OrbitalElements, Anomalies, DAYS_PER_YEAR,
    normalize_degrees, signed_degrees, solve_kepler, true_anomaly, anomalies,
    perifocal_position, heliocentric_position, ecliptic_longitude,
};
pub use path::orbit_path;
