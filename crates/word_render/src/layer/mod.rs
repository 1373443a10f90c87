pub mod config;
pub mod grid;
pub mod mapping;
pub mod planner;
pub mod presets;
