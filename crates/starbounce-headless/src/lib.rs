pub mod autopilot;
pub mod config;
pub mod driver;
pub mod trace_renderer;
