//! Camera simulation
//!
//! The camera and the controls that drive it from collected input.

pub mod camera;
pub mod controller;

pub use camera::{Camera, CameraMovement};
pub use controller::FlyController;
