pub mod bodies;
pub mod manifest;
pub mod registry;
pub mod stars;
pub mod zodiac;

pub use manifest::{BodyDescriptor, BodyManifest};
pub use registry::BodyCatalog;
pub use stars::{CatalogStar, Constellation, NamedStar, StarCatalog};
pub use zodiac::{Element, ZodiacSign, SIGNS};
