//! Translation from winit events to platform messages
//!
//! winit already decodes HID reports, so the bridge re-encodes what it gets
//! as raw-input packets. Keyboard strokes are mapped back to virtual keys,
//! scan codes and the E0 prefix so the collector sees the same ambiguity a
//! native raw-input stream has.

use glam::{DVec2, IVec2};
use winit::event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::keys::InputKey;
use super::raw::{KeyFlags, MouseButtonFlags, RawInputPacket, RawKeyboard, RawMouse, WHEEL_DELTA};
use super::handler::WindowMessage;

/// Pixels of precise scrolling that make up one wheel notch
const PIXELS_PER_NOTCH: f64 = 20.0;

/// Converts winit device events into raw-input messages
///
/// Backends report motion and precise scrolling in fractional units while a
/// raw-input record carries whole counts, so the remainders are carried over
/// to the next event.
#[derive(Debug, Default)]
pub struct Bridge {
    /// Motion not yet emitted, in pixels
    motion: DVec2,
    /// Wheel travel not yet emitted, in [`WHEEL_DELTA`] units
    wheel: f64,
}

impl Bridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Converts a device event into a message, if it carries raw input
    pub fn device_message(&mut self, event: &DeviceEvent) -> Option<WindowMessage> {
        let packet = match event {
            DeviceEvent::MouseMotion { delta: (dx, dy) } => {
                let whole = self.take_motion(DVec2::new(*dx, *dy))?;
                RawInputPacket::mouse(RawMouse::relative(whole.x, whole.y))
            }
            DeviceEvent::MouseWheel { delta } => {
                RawInputPacket::mouse(RawMouse::wheel(self.take_wheel(delta)?))
            }
            DeviceEvent::Key(raw) => {
                let PhysicalKey::Code(code) = raw.physical_key else {
                    return None;
                };
                RawInputPacket::keyboard(keyboard_record(code, raw.state)?)
            }
            _ => return None,
        };
        Some(WindowMessage::RawInput(packet))
    }

    /// Forgets carried-over motion and scrolling
    pub fn reset(&mut self) {
        self.motion = DVec2::ZERO;
        self.wheel = 0.0;
    }

    fn take_motion(&mut self, delta: DVec2) -> Option<IVec2> {
        let total = self.motion + delta;
        let whole = total.round();
        self.motion = total - whole;
        (whole != DVec2::ZERO).then(|| whole.as_ivec2())
    }

    /// Whole notches of accumulated wheel travel, in raw units
    fn take_wheel(&mut self, delta: &MouseScrollDelta) -> Option<i16> {
        self.wheel += wheel_units(delta);
        let step = f64::from(WHEEL_DELTA);
        let notches = (self.wheel / step).trunc();
        if notches == 0.0 {
            return None;
        }
        self.wheel -= notches * step;
        Some((notches * step).clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16)
    }
}

/// Converts a window event into a message, if it carries raw input
///
/// Mouse buttons are taken from window events because device button ids are
/// not portable across backends. Keys arrive on both paths on some backends;
/// the collector's edge triggering drops the duplicate.
pub fn window_message(event: &WindowEvent) -> Option<WindowMessage> {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            let record = keyboard_record(code, event.state)?;
            Some(WindowMessage::RawInput(RawInputPacket::keyboard(record)))
        }
        WindowEvent::MouseInput { state, button, .. } => {
            let flags = button_flags(*button, *state)?;
            Some(WindowMessage::RawInput(RawInputPacket::mouse(
                RawMouse::buttons(flags),
            )))
        }
        _ => None,
    }
}

fn wheel_units(delta: &MouseScrollDelta) -> f64 {
    let step = f64::from(WHEEL_DELTA);
    match delta {
        MouseScrollDelta::LineDelta(_, y) => f64::from(*y) * step,
        MouseScrollDelta::PixelDelta(pos) => pos.y * step / PIXELS_PER_NOTCH,
    }
}

fn button_flags(button: MouseButton, state: ElementState) -> Option<MouseButtonFlags> {
    let pressed = state.is_pressed();
    let pick = |down, up| Some(if pressed { down } else { up });
    match button {
        MouseButton::Left => pick(MouseButtonFlags::BUTTON_1_DOWN, MouseButtonFlags::BUTTON_1_UP),
        MouseButton::Right => pick(MouseButtonFlags::BUTTON_2_DOWN, MouseButtonFlags::BUTTON_2_UP),
        MouseButton::Middle => pick(MouseButtonFlags::BUTTON_3_DOWN, MouseButtonFlags::BUTTON_3_UP),
        MouseButton::Back => pick(MouseButtonFlags::BUTTON_4_DOWN, MouseButtonFlags::BUTTON_4_UP),
        MouseButton::Forward => pick(MouseButtonFlags::BUTTON_5_DOWN, MouseButtonFlags::BUTTON_5_UP),
        MouseButton::Other(_) => None,
    }
}

/// Builds the raw keyboard record a PC keyboard would produce for `code`
pub fn keyboard_record(code: KeyCode, state: ElementState) -> Option<RawKeyboard> {
    let (vkey, scan, extended) = stroke_for(code)?;
    let mut flags = KeyFlags::empty();
    flags.set(KeyFlags::E0, extended);
    flags.set(KeyFlags::BREAK, !state.is_pressed());
    Some(RawKeyboard::new(u16::from(vkey.code()), scan, flags))
}

/// Virtual key, set-1 scan code and E0 prefix for a physical key
fn stroke_for(code: KeyCode) -> Option<(InputKey, u16, bool)> {
    use KeyCode as K;

    let stroke = match code {
        K::Escape => (InputKey::ESCAPE, 0x01, false),
        K::Digit1 => (InputKey::DIGIT_1, 0x02, false),
        K::Digit2 => (InputKey::DIGIT_2, 0x03, false),
        K::Digit3 => (InputKey::DIGIT_3, 0x04, false),
        K::Digit4 => (InputKey::DIGIT_4, 0x05, false),
        K::Digit5 => (InputKey::DIGIT_5, 0x06, false),
        K::Digit6 => (InputKey::DIGIT_6, 0x07, false),
        K::Digit7 => (InputKey::DIGIT_7, 0x08, false),
        K::Digit8 => (InputKey::DIGIT_8, 0x09, false),
        K::Digit9 => (InputKey::DIGIT_9, 0x0A, false),
        K::Digit0 => (InputKey::DIGIT_0, 0x0B, false),
        K::Minus => (InputKey::MINUS, 0x0C, false),
        K::Equal => (InputKey::EQUAL, 0x0D, false),
        K::Backspace => (InputKey::BACK, 0x0E, false),
        K::Tab => (InputKey::TAB, 0x0F, false),
        K::KeyQ => (InputKey::Q, 0x10, false),
        K::KeyW => (InputKey::W, 0x11, false),
        K::KeyE => (InputKey::E, 0x12, false),
        K::KeyR => (InputKey::R, 0x13, false),
        K::KeyT => (InputKey::T, 0x14, false),
        K::KeyY => (InputKey::Y, 0x15, false),
        K::KeyU => (InputKey::U, 0x16, false),
        K::KeyI => (InputKey::I, 0x17, false),
        K::KeyO => (InputKey::O, 0x18, false),
        K::KeyP => (InputKey::P, 0x19, false),
        K::BracketLeft => (InputKey::LBRACKET, 0x1A, false),
        K::BracketRight => (InputKey::RBRACKET, 0x1B, false),
        K::Enter => (InputKey::RETURN, 0x1C, false),
        K::ControlLeft => (InputKey::CONTROL, 0x1D, false),
        K::KeyA => (InputKey::A, 0x1E, false),
        K::KeyS => (InputKey::S, 0x1F, false),
        K::KeyD => (InputKey::D, 0x20, false),
        K::KeyF => (InputKey::F, 0x21, false),
        K::KeyG => (InputKey::G, 0x22, false),
        K::KeyH => (InputKey::H, 0x23, false),
        K::KeyJ => (InputKey::J, 0x24, false),
        K::KeyK => (InputKey::K, 0x25, false),
        K::KeyL => (InputKey::L, 0x26, false),
        K::Semicolon => (InputKey::SEMICOLON, 0x27, false),
        K::Quote => (InputKey::APOSTROPHE, 0x28, false),
        K::Backquote => (InputKey::GRAVE, 0x29, false),
        K::ShiftLeft => (InputKey::SHIFT, 0x2A, false),
        K::Backslash => (InputKey::BACKSLASH, 0x2B, false),
        K::KeyZ => (InputKey::Z, 0x2C, false),
        K::KeyX => (InputKey::X, 0x2D, false),
        K::KeyC => (InputKey::C, 0x2E, false),
        K::KeyV => (InputKey::V, 0x2F, false),
        K::KeyB => (InputKey::B, 0x30, false),
        K::KeyN => (InputKey::N, 0x31, false),
        K::KeyM => (InputKey::M, 0x32, false),
        K::Comma => (InputKey::COMMA, 0x33, false),
        K::Period => (InputKey::PERIOD, 0x34, false),
        K::Slash => (InputKey::SLASH, 0x35, false),
        K::ShiftRight => (InputKey::SHIFT, 0x36, false),
        K::NumpadMultiply => (InputKey::NUMPAD_MULTIPLY, 0x37, false),
        K::AltLeft => (InputKey::MENU, 0x38, false),
        K::Space => (InputKey::SPACE, 0x39, false),
        K::CapsLock => (InputKey::CAPITAL, 0x3A, false),
        K::F1 => (InputKey::F1, 0x3B, false),
        K::F2 => (InputKey::F2, 0x3C, false),
        K::F3 => (InputKey::F3, 0x3D, false),
        K::F4 => (InputKey::F4, 0x3E, false),
        K::F5 => (InputKey::F5, 0x3F, false),
        K::F6 => (InputKey::F6, 0x40, false),
        K::F7 => (InputKey::F7, 0x41, false),
        K::F8 => (InputKey::F8, 0x42, false),
        K::F9 => (InputKey::F9, 0x43, false),
        K::F10 => (InputKey::F10, 0x44, false),
        K::NumLock => (InputKey::NUMLOCK, 0x45, false),
        K::ScrollLock => (InputKey::SCROLL, 0x46, false),
        K::Numpad7 => (InputKey::NUMPAD7, 0x47, false),
        K::Numpad8 => (InputKey::NUMPAD8, 0x48, false),
        K::Numpad9 => (InputKey::NUMPAD9, 0x49, false),
        K::NumpadSubtract => (InputKey::NUMPAD_SUBTRACT, 0x4A, false),
        K::Numpad4 => (InputKey::NUMPAD4, 0x4B, false),
        K::Numpad5 => (InputKey::NUMPAD5, 0x4C, false),
        K::Numpad6 => (InputKey::NUMPAD6, 0x4D, false),
        K::NumpadAdd => (InputKey::NUMPAD_ADD, 0x4E, false),
        K::Numpad1 => (InputKey::NUMPAD1, 0x4F, false),
        K::Numpad2 => (InputKey::NUMPAD2, 0x50, false),
        K::Numpad3 => (InputKey::NUMPAD3, 0x51, false),
        K::Numpad0 => (InputKey::NUMPAD0, 0x52, false),
        K::NumpadDecimal => (InputKey::NUMPAD_DECIMAL, 0x53, false),
        K::F11 => (InputKey::F11, 0x57, false),
        K::F12 => (InputKey::F12, 0x58, false),
        K::NumpadEnter => (InputKey::RETURN, 0x1C, true),
        K::ControlRight => (InputKey::CONTROL, 0x1D, true),
        K::NumpadDivide => (InputKey::NUMPAD_DIVIDE, 0x35, true),
        K::AltRight => (InputKey::MENU, 0x38, true),
        K::Home => (InputKey::HOME, 0x47, true),
        K::ArrowUp => (InputKey::UP, 0x48, true),
        K::PageUp => (InputKey::PRIOR, 0x49, true),
        K::ArrowLeft => (InputKey::LEFT, 0x4B, true),
        K::ArrowRight => (InputKey::RIGHT, 0x4D, true),
        K::End => (InputKey::END, 0x4F, true),
        K::ArrowDown => (InputKey::DOWN, 0x50, true),
        K::PageDown => (InputKey::NEXT, 0x51, true),
        K::Insert => (InputKey::INSERT, 0x52, true),
        K::Delete => (InputKey::DELETE, 0x53, true),
        K::SuperLeft => (InputKey::LWIN, 0x5B, true),
        K::SuperRight => (InputKey::RWIN, 0x5C, true),
        K::ContextMenu => (InputKey::APPS, 0x5D, true),
        K::PrintScreen => (InputKey::SNAPSHOT, 0x37, true),
        K::Pause => (InputKey::PAUSE, 0x45, false),
        _ => return None,
    };
    Some(stroke)
}
