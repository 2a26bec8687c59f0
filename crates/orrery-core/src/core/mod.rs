pub mod scene;
pub mod selection;
pub mod time;
