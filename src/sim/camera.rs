//! First-person camera driven by yaw and pitch

use glam::{Mat4, Vec3};

use crate::app::CameraConfig;

/// Pitch limit in degrees; looking straight up or down would flip the basis
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view in degrees
pub const ZOOM_MIN: f32 = 1.0;
/// Widest field of view in degrees
pub const ZOOM_MAX: f32 = 45.0;

/// Direction of a movement command, relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

/// Euler-angle free-fly camera
///
/// `front`, `right` and `up` are derived from yaw and pitch and are never
/// set directly.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    front: Vec3,
    right: Vec3,
    up: Vec3,
    world_up: Vec3,
    /// Degrees
    yaw: f32,
    /// Degrees, within +/- PITCH_LIMIT
    pitch: f32,
    speed: f32,
    sensitivity: f32,
    /// Vertical field of view in degrees
    zoom: f32,
}

impl Camera {
    /// Create camera with the default placement
    pub fn new() -> Self {
        Self::from_config(&CameraConfig::default())
    }

    /// Create camera from configuration, clamping angles into range
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(config.position),
            front: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            world_up: Vec3::Y,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            speed: config.speed,
            sensitivity: config.sensitivity,
            zoom: config.zoom.clamp(ZOOM_MIN, ZOOM_MAX),
        };
        camera.update_vectors();
        camera
    }

    /// Move along one basis vector by `speed * dt`
    pub fn apply_movement(&mut self, direction: CameraMovement, dt: f32) {
        let velocity = self.speed * dt;
        let offset = match direction {
            CameraMovement::Forward => self.front,
            CameraMovement::Backward => -self.front,
            CameraMovement::Left => -self.right,
            CameraMovement::Right => self.right,
            CameraMovement::Up => self.up,
            CameraMovement::Down => -self.up,
        };
        self.position += offset * velocity;
    }

    /// Rotate by a look delta; positive `delta_pitch` looks down
    pub fn apply_look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw * self.sensitivity;
        self.pitch -= delta_pitch * self.sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.update_vectors();
    }

    /// Narrow the field of view by `delta` degrees
    pub fn apply_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Right-handed look-at transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// OpenGL-style perspective projection using the current zoom as field of view
    pub fn projection_matrix(&self, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.zoom.to_radians(), aspect_ratio, near, far)
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn front(&self) -> Vec3 {
        self.front
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    fn update_vectors(&mut self) {
        let (yaw_sin, yaw_cos) = self.yaw.to_radians().sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.to_radians().sin_cos();

        self.front = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos).normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
