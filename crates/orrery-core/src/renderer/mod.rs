pub mod camera;
pub mod flight;
pub mod instance;

pub use camera::{Camera3D, default_flight_distance};
pub use flight::{resolve, focus_key, FlyTarget, FlightStatus, CameraFlightController};
pub use instance::BodyInstance;
