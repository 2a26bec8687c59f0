pub mod harmonics;
pub mod keplerian;
pub mod service;

pub use harmonics::{harmonic_clusters, harmonic_spectrum, HarmonicCluster, HarmonicStrength};
pub use keplerian::KeplerianChart;
pub use service::{
    AspectRecord, BodyMotion, ChartRequest, ChartService, ChartSnapshot, HouseSystem, PatternRecord,
};
