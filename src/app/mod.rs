//! Application module
//!
//! Handles windowing, configuration and user input.

pub mod config;
mod cursor;
pub mod input;
mod runner;
mod window;

pub use config::{AppConfig, CameraConfig, ControlsConfig, KeyBindings, WindowConfig};
pub use cursor::WinitCursor;
pub use runner::App;
pub use window::{aspect_ratio, window_attributes_from_config};
