pub mod app;
pub mod settings;
pub mod types;
