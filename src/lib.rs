//! freelook
//!
//! Raw input collection and a free-fly camera, built on winit and glam.

/// Application - windowing, configuration and input handling
pub mod app;

/// Frame timing
pub mod clock;

/// Camera and the controls that drive it
pub mod sim;
