//! Raw input collection from platform messages

use std::any::Any;

use glam::{IVec2, Vec2};
use tracing::{debug, trace, warn};

use super::events::InputEvent;
use super::handler::{WindowHandle, WindowMessage, WindowMessageSink};
use super::keyboard;
use super::keys::{ButtonsState, InputKey};
use super::platform::{CursorGlyph, CursorPlatform, ScreenArea};
use super::raw::{
    ABSOLUTE_RANGE, MouseButtonFlags, MouseMoveFlags, RawInput, RawKeyboard, RawMouse, WHEEL_DELTA,
};

/// Button transition flags and the key each one drives
const MOUSE_BUTTONS: [(MouseButtonFlags, MouseButtonFlags, InputKey); 5] = [
    (
        MouseButtonFlags::BUTTON_1_DOWN,
        MouseButtonFlags::BUTTON_1_UP,
        InputKey::LBUTTON,
    ),
    (
        MouseButtonFlags::BUTTON_2_DOWN,
        MouseButtonFlags::BUTTON_2_UP,
        InputKey::RBUTTON,
    ),
    (
        MouseButtonFlags::BUTTON_3_DOWN,
        MouseButtonFlags::BUTTON_3_UP,
        InputKey::MBUTTON,
    ),
    (
        MouseButtonFlags::BUTTON_4_DOWN,
        MouseButtonFlags::BUTTON_4_UP,
        InputKey::MOUSE4,
    ),
    (
        MouseButtonFlags::BUTTON_5_DOWN,
        MouseButtonFlags::BUTTON_5_UP,
        InputKey::MOUSE5,
    ),
];

/// Cursor capture state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CursorState {
    /// OS cursor position snapshotted when the cursor was last hidden
    pos: IVec2,
    /// Whether the cursor is captured
    hidden: bool,
}

/// Capture-mode control, as seen by application logic
pub trait CursorCapture {
    /// Release the cursor and put it back where it was when captured
    fn show_cursor(&mut self);

    /// Capture the cursor, remembering where it is
    fn hide_cursor(&mut self);

    fn is_cursor_hidden(&self) -> bool;
}

/// Decodes platform messages into an event queue and a button table
///
/// Register it on a [`SinkChain`](super::SinkChain) and call
/// [`flush_events`](Self::flush_events) once per frame.
pub struct InputCollector<P> {
    platform: P,
    events: Vec<InputEvent>,
    buttons: ButtonsState,
    cursor: CursorState,
    /// Previous absolute pointer sample, in screen pixels
    last_absolute: Option<Vec2>,
}

impl<P: CursorPlatform> InputCollector<P> {
    /// Creates a collector with the cursor free
    pub fn new(platform: P) -> Self {
        let pos = platform.cursor_position();
        Self {
            platform,
            events: Vec::new(),
            buttons: ButtonsState::new(),
            cursor: CursorState { pos, hidden: false },
            last_absolute: None,
        }
    }

    /// Takes every event received since the previous call, oldest first
    pub fn flush_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Polled state of every key
    pub fn buttons(&self) -> &ButtonsState {
        &self.buttons
    }

    pub fn is_down(&self, key: InputKey) -> bool {
        self.buttons.is_down(key)
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Forgets pending events, held keys and the absolute pointer sample
    ///
    /// Used when the window loses focus: releases will never arrive for keys
    /// held at that point.
    pub fn reset(&mut self) {
        self.events.clear();
        self.buttons.clear();
        self.last_absolute = None;
    }

    fn handle_raw_keyboard(&mut self, raw: &RawKeyboard) {
        let Some(stroke) = keyboard::resolve(raw) else {
            return;
        };

        if self.buttons.set(stroke.key, stroke.down) {
            trace!(key = %stroke.key, scan_code = stroke.scan_code, down = stroke.down, "Key");
            self.events.push(if stroke.down {
                InputEvent::KeyDown { key: stroke.key }
            } else {
                InputEvent::KeyUp { key: stroke.key }
            });
        }
    }

    fn handle_raw_mouse(&mut self, window: WindowHandle, raw: &RawMouse) {
        let move_flags = raw.move_flags();
        let sample = Vec2::new(raw.last_x as f32, raw.last_y as f32);

        let delta = if move_flags.contains(MouseMoveFlags::ABSOLUTE) {
            let area = if move_flags.contains(MouseMoveFlags::VIRTUAL_DESKTOP) {
                ScreenArea::VirtualDesktop
            } else {
                ScreenArea::Primary
            };
            let size = self.platform.screen_size(area).as_vec2();
            let current = sample / ABSOLUTE_RANGE * size;

            match self.last_absolute {
                Some(previous) => {
                    let delta = (current - previous).as_ivec2();
                    // Only the emitted whole pixels advance the reference point
                    self.last_absolute = Some(previous + delta.as_vec2());
                    delta
                }
                None => {
                    self.last_absolute = Some(current);
                    IVec2::ZERO
                }
            }
        } else {
            sample.as_ivec2()
        };

        if delta != IVec2::ZERO {
            let pos = self.platform.message_cursor_position(window);
            self.events.push(InputEvent::MouseMove { pos, delta });
        }

        let button_flags = raw.button_flags();

        if button_flags.contains(MouseButtonFlags::WHEEL) {
            let notches = i32::from(raw.wheel_delta()) / WHEEL_DELTA;
            if notches != 0 {
                self.events.push(InputEvent::MouseWheel { delta: notches });
            }
        }

        for (down_flag, up_flag, button) in MOUSE_BUTTONS {
            for (flag, down) in [(down_flag, true), (up_flag, false)] {
                if button_flags.contains(flag) && self.buttons.set(button, down) {
                    debug!(%button, down, "Mouse button");
                    self.events.push(if down {
                        InputEvent::MouseDown { button }
                    } else {
                        InputEvent::MouseUp { button }
                    });
                }
            }
        }
    }

    fn handle_set_cursor(&mut self, window: WindowHandle) {
        if self.cursor.hidden {
            if let Some(center) = self.platform.client_center(window) {
                self.platform.set_cursor_position(center);
            }
            self.platform.set_cursor_glyph(CursorGlyph::Cross);
        } else {
            self.platform.set_cursor_glyph(CursorGlyph::Arrow);
        }
    }
}

impl<P: CursorPlatform> CursorCapture for InputCollector<P> {
    fn show_cursor(&mut self) {
        self.cursor.hidden = false;
        self.platform.set_cursor_position(self.cursor.pos);
        debug!(pos = ?self.cursor.pos, "Cursor released");
    }

    fn hide_cursor(&mut self) {
        self.cursor.hidden = true;
        self.cursor.pos = self.platform.cursor_position();
        debug!(pos = ?self.cursor.pos, "Cursor captured");
    }

    fn is_cursor_hidden(&self) -> bool {
        self.cursor.hidden
    }
}

impl<P: CursorPlatform + 'static> WindowMessageSink for InputCollector<P> {
    fn name(&self) -> &str {
        "input"
    }

    fn handle_window_message(&mut self, window: WindowHandle, message: &WindowMessage) -> bool {
        match message {
            WindowMessage::RawInput(packet) => match packet.decode() {
                Ok(RawInput::Keyboard(raw)) => {
                    self.handle_raw_keyboard(&raw);
                    true
                }
                Ok(RawInput::Mouse(raw)) => {
                    self.handle_raw_mouse(window, &raw);
                    true
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring raw input message");
                    false
                }
            },
            WindowMessage::SetCursor => {
                self.handle_set_cursor(window);
                true
            }
            WindowMessage::Other(_) => false,
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
