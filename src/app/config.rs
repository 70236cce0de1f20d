//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use super::input::InputKey;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be fullscreen
    pub fullscreen: bool,
    /// Whether the window should be resizable
    pub resizable: bool,
    /// Whether the window should be decorated (has title bar, borders, etc.)
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "freelook".to_string(),
            width: 800.0,
            height: 600.0,
            fullscreen: false,
            resizable: true,
            decorated: true,
        }
    }
}

/// Initial camera placement and tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// World-space starting position
    pub position: [f32; 3],
    /// Starting yaw in degrees (-90 looks down -Z)
    pub yaw: f32,
    /// Starting pitch in degrees
    pub pitch: f32,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Degrees of rotation per unit of mouse motion
    pub sensitivity: f32,
    /// Starting vertical field of view in degrees
    pub zoom: f32,
    /// Near clip plane distance
    pub near: f32,
    /// Far clip plane distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, -3.0],
            yaw: -90.0,
            pitch: 0.0,
            speed: 2.5,
            sensitivity: 0.5,
            zoom: 45.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

/// Key bindings for the fly controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub forward: InputKey,
    pub backward: InputKey,
    pub left: InputKey,
    pub right: InputKey,
    pub up: InputKey,
    pub down: InputKey,
    /// Released to toggle cursor capture
    pub toggle_capture: InputKey,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: InputKey::W,
            backward: InputKey::S,
            left: InputKey::A,
            right: InputKey::D,
            up: InputKey::Q,
            down: InputKey::E,
            toggle_capture: InputKey::ESCAPE,
        }
    }
}

/// Input handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub bindings: KeyBindings,
    /// Degrees of zoom per wheel notch
    pub zoom_per_notch: f32,
    /// Capture the cursor as soon as the window opens
    pub start_captured: bool,
    /// Sleep at the end of each frame, in milliseconds (0 disables pacing)
    pub frame_sleep_ms: u64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            zoom_per_notch: 10.0,
            start_captured: true,
            frame_sleep_ms: 0,
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Input configuration
    #[serde(default)]
    pub controls: ControlsConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_CAMERA__SPEED=5)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&config_dir, profile)
    }

    /// Loads `{dir}/{profile}.*` plus environment overrides
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            // Use __ as separator for nested fields (e.g., APP_WINDOW__WIDTH)
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile: "release".to_string(),
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            controls: ControlsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_missing_profile_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from_dir(dir.path(), "nonexistent").unwrap();
        assert_eq!(config.profile, "nonexistent");
        assert_eq!(config.controls.bindings, KeyBindings::default());
        assert_eq!(config.camera.zoom, 45.0);
    }

    #[test]
    fn test_profile_file_overrides() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("custom.toml"),
            r#"
[window]
title = "Cube field"
width = 1280.0

[camera]
speed = 5.0
position = [1.0, 2.0, 3.0]

[controls]
zoom_per_notch = 2.5

[controls.bindings]
forward = "UP"
toggle_capture = "F1"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_dir(dir.path(), "custom").unwrap();
        assert_eq!(config.window.title, "Cube field");
        assert_eq!(config.window.width, 1280.0);
        assert_eq!(config.window.height, 600.0);
        assert_eq!(config.camera.speed, 5.0);
        assert_eq!(config.camera.position, [1.0, 2.0, 3.0]);
        assert_eq!(config.controls.zoom_per_notch, 2.5);
        assert_eq!(config.controls.bindings.forward, InputKey::UP);
        assert_eq!(config.controls.bindings.toggle_capture, InputKey::F1);
        assert_eq!(config.controls.bindings.backward, InputKey::S);
    }

    #[test]
    fn test_unknown_key_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("bad.toml"),
            "[controls.bindings]\nforward = \"NOPE\"\n",
        )
        .unwrap();

        assert!(AppConfig::load_from_dir(dir.path(), "bad").is_err());
    }
}
