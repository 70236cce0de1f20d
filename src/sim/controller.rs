//! Maps collected input onto camera commands

use crate::app::input::{ButtonsState, CursorCapture, InputEvent, InputKey};
use crate::app::{ControlsConfig, KeyBindings};

use super::camera::{Camera, CameraMovement};

/// Free-fly controls
///
/// While the cursor is captured, mouse motion looks around, the wheel zooms
/// and held movement keys translate the camera. The capture key toggles
/// capture on release and is honored in both modes.
#[derive(Debug, Clone)]
pub struct FlyController {
    bindings: KeyBindings,
    zoom_per_notch: f32,
}

impl FlyController {
    pub fn new(controls: &ControlsConfig) -> Self {
        Self {
            bindings: controls.bindings,
            zoom_per_notch: controls.zoom_per_notch,
        }
    }

    /// Applies one frame of input
    ///
    /// `events` are the events flushed this frame, `buttons` the polled key
    /// table after those events.
    pub fn update(
        &self,
        events: &[InputEvent],
        buttons: &ButtonsState,
        cursor: &mut impl CursorCapture,
        camera: &mut Camera,
        dt: f32,
    ) {
        for event in events {
            if event.is_release_of(self.bindings.toggle_capture) {
                if cursor.is_cursor_hidden() {
                    cursor.show_cursor();
                } else {
                    cursor.hide_cursor();
                }
            }

            if !cursor.is_cursor_hidden() {
                continue;
            }

            match *event {
                InputEvent::MouseMove { delta, .. } => {
                    camera.apply_look(delta.x as f32, delta.y as f32);
                }
                InputEvent::MouseWheel { delta } => {
                    camera.apply_zoom(delta as f32 * self.zoom_per_notch);
                }
                _ => {}
            }
        }

        if !cursor.is_cursor_hidden() {
            return;
        }

        for (key, direction) in self.movement_keys() {
            if buttons.is_down(key) {
                camera.apply_movement(direction, dt);
            }
        }
    }

    fn movement_keys(&self) -> [(InputKey, CameraMovement); 6] {
        [
            (self.bindings.forward, CameraMovement::Forward),
            (self.bindings.backward, CameraMovement::Backward),
            (self.bindings.left, CameraMovement::Left),
            (self.bindings.right, CameraMovement::Right),
            (self.bindings.up, CameraMovement::Up),
            (self.bindings.down, CameraMovement::Down),
        ]
    }
}

impl Default for FlyController {
    fn default() -> Self {
        Self::new(&ControlsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use glam::{IVec2, Vec3};

    use super::*;

    #[derive(Default)]
    struct Capture {
        hidden: bool,
        toggles: u32,
    }

    impl CursorCapture for Capture {
        fn show_cursor(&mut self) {
            self.hidden = false;
            self.toggles += 1;
        }

        fn hide_cursor(&mut self) {
            self.hidden = true;
            self.toggles += 1;
        }

        fn is_cursor_hidden(&self) -> bool {
            self.hidden
        }
    }

    fn captured() -> Capture {
        Capture {
            hidden: true,
            toggles: 0,
        }
    }

    #[test]
    fn test_escape_release_toggles_capture() {
        let controller = FlyController::default();
        let mut camera = Camera::new();
        let mut cursor = Capture::default();
        let buttons = ButtonsState::new();

        let press = [InputEvent::KeyDown {
            key: InputKey::ESCAPE,
        }];
        controller.update(&press, &buttons, &mut cursor, &mut camera, 0.016);
        assert!(!cursor.hidden);

        let release = [InputEvent::KeyUp {
            key: InputKey::ESCAPE,
        }];
        controller.update(&release, &buttons, &mut cursor, &mut camera, 0.016);
        assert!(cursor.hidden);
        controller.update(&release, &buttons, &mut cursor, &mut camera, 0.016);
        assert!(!cursor.hidden);
        assert_eq!(cursor.toggles, 2);
    }

    #[test]
    fn test_look_and_zoom_only_while_captured() {
        let controller = FlyController::default();
        let mut camera = Camera::new();
        let buttons = ButtonsState::new();
        let events = [
            InputEvent::MouseMove {
                pos: IVec2::ZERO,
                delta: IVec2::new(10, 4),
            },
            InputEvent::MouseWheel { delta: 1 },
        ];

        let mut free = Capture::default();
        controller.update(&events, &buttons, &mut free, &mut camera, 0.016);
        assert_eq!(camera.yaw(), -90.0);
        assert_eq!(camera.zoom(), 45.0);

        let mut cursor = captured();
        controller.update(&events, &buttons, &mut cursor, &mut camera, 0.016);
        assert_eq!(camera.yaw(), -85.0);
        assert_eq!(camera.pitch(), -2.0);
        assert_eq!(camera.zoom(), 35.0);
    }

    #[test]
    fn test_held_keys_move_camera() {
        let controller = FlyController::default();
        let mut camera = Camera::new();
        let mut buttons = ButtonsState::new();
        buttons.set(InputKey::W, true);
        buttons.set(InputKey::D, true);

        let mut cursor = captured();
        controller.update(&[], &buttons, &mut cursor, &mut camera, 1.0);
        assert!(
            camera
                .position()
                .abs_diff_eq(Vec3::new(2.5, 0.0, -5.5), 1e-5)
        );

        let mut free = Capture::default();
        controller.update(&[], &buttons, &mut free, &mut camera, 1.0);
        assert!(
            camera
                .position()
                .abs_diff_eq(Vec3::new(2.5, 0.0, -5.5), 1e-5)
        );
    }

    #[test]
    fn test_custom_bindings() {
        let mut controls = ControlsConfig::default();
        controls.bindings.forward = InputKey::UP;
        controls.zoom_per_notch = 1.0;
        let controller = FlyController::new(&controls);

        let mut camera = Camera::new();
        let mut buttons = ButtonsState::new();
        buttons.set(InputKey::W, true);
        let mut cursor = captured();
        controller.update(&[], &buttons, &mut cursor, &mut camera, 1.0);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -3.0));

        buttons.set(InputKey::UP, true);
        controller.update(
            &[InputEvent::MouseWheel { delta: 2 }],
            &buttons,
            &mut cursor,
            &mut camera,
            1.0,
        );
        assert!(camera.position().abs_diff_eq(Vec3::new(0.0, 0.0, -5.5), 1e-5));
        assert_eq!(camera.zoom(), 43.0);
    }
}
