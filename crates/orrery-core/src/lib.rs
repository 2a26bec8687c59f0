pub mod api;
pub mod core;
pub mod orbit;
pub mod coords;
pub mod catalog;
pub mod chart;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;

// Re-export key types at crate root for convenience
pub use api::app::{Orrery, OrreryConfig, OrbitPath};
pub use api::settings::{AppSettings, SettingsPatch, BirthChartRecord};
pub use api::types::{BodyState, Position3D, OrreryEvent};
pub use core::scene::{ScenePhase, ViewMode, SceneTrigger, SceneVisibility, ViewEvent, ViewState, SceneTransitionMachine};
pub use core::selection::Selection;
pub use core::time::{TimeDriver, FrameTimer, speed_from_slider, slider_from_speed, days_since_j2000, julian_day};
pub use orbit::{OrbitalElements, solve_kepler, true_anomaly, heliocentric_position, orbit_path};
pub use coords::{scale_orbit_radius, ecliptic_to_display, ecliptic_to_equatorial, equatorial_to_unit_sphere};
pub use catalog::{BodyCatalog, BodyDescriptor, BodyManifest, StarCatalog};
pub use chart::{ChartService, ChartRequest, ChartSnapshot, BodyMotion, HouseSystem, KeplerianChart, HarmonicCluster};
pub use systems::{PositionSampler, SkyBody, SkyDome, AspectLine, CuspLine, HarmonicLine, Segment};
pub use renderer::{Camera3D, FlyTarget, FlightStatus, CameraFlightController, BodyInstance};
pub use input::queue::{InputEvent, InputQueue};
pub use bridge::frame::FrameBuffer;
pub use bridge::protocol::ProtocolLayout;
pub use extensions::Easing;
