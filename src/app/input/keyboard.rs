//! Keystroke resolution
//!
//! Raw keyboard records report a virtual key that is ambiguous for keys that
//! exist twice on a PC keyboard. The scan-code prefix bits decide which one
//! was actually pressed:
//!
//! | virtual key                                   | E0 set        | E0 clear          |
//! |-----------------------------------------------|---------------|-------------------|
//! | CONTROL / MENU                                | right         | left              |
//! | RETURN                                        | numpad enter  | return            |
//! | INSERT, DELETE, HOME, END, PRIOR, NEXT, arrows | navigation    | numpad            |
//! | CLEAR                                         | clear         | numpad 5          |
//!
//! SHIFT never carries E0; its scan code tells left (0x2A) from right (0x36).

use super::keys::InputKey;
use super::raw::{KeyFlags, RawKeyboard};

/// Virtual key used for the filler strokes of escaped sequences
const VK_FAKE: u16 = 0xFF;

const SCAN_LEFT_SHIFT: u16 = 0x2A;
const SCAN_RIGHT_SHIFT: u16 = 0x36;
const SCAN_PAUSE: u16 = 0x45;

/// A keystroke after disambiguation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keystroke {
    pub key: InputKey,
    /// Scan code, with bit 8 set for extended keys
    pub scan_code: u16,
    pub down: bool,
}

/// Resolves a raw keyboard record, or `None` for strokes that carry no key
pub fn resolve(raw: &RawKeyboard) -> Option<Keystroke> {
    if raw.vkey == VK_FAKE {
        return None;
    }

    let flags = raw.key_flags();
    let e0 = flags.contains(KeyFlags::E0);
    let e1 = flags.contains(KeyFlags::E1);

    let mut vkey = raw.vkey;
    let mut scan_code = raw.make_code;

    if vkey == u16::from(InputKey::SHIFT.code()) {
        vkey = match scan_code {
            SCAN_RIGHT_SHIFT => InputKey::RIGHT_SHIFT,
            _ => InputKey::LEFT_SHIFT,
        }
        .code()
        .into();
    } else if vkey == u16::from(InputKey::NUMLOCK.code()) {
        // NUM LOCK arrives without E0 even though it is an extended key
        scan_code |= 0x100;
    }

    if e1 && vkey == u16::from(InputKey::PAUSE.code()) {
        scan_code = SCAN_PAUSE;
    }
    if e0 {
        scan_code |= 0x100;
    }

    // Virtual keys never exceed a byte; anything wider is passed through truncated
    let base = InputKey::from_code(vkey as u8);
    let key = match base {
        InputKey::CONTROL if e0 => InputKey::RIGHT_CTRL,
        InputKey::CONTROL => InputKey::LEFT_CTRL,
        InputKey::MENU if e0 => InputKey::RIGHT_ALT,
        InputKey::MENU => InputKey::LEFT_ALT,
        InputKey::RETURN if e0 => InputKey::NUMPAD_ENTER,
        key if !e0 => numpad_alias(key).unwrap_or(key),
        key => key,
    };

    Some(Keystroke {
        key,
        scan_code,
        down: !flags.contains(KeyFlags::BREAK),
    })
}

/// Numpad key sharing a virtual key with a navigation key
fn numpad_alias(key: InputKey) -> Option<InputKey> {
    let alias = match key {
        InputKey::INSERT => InputKey::NUMPAD0,
        InputKey::DELETE => InputKey::NUMPAD_DECIMAL,
        InputKey::HOME => InputKey::NUMPAD7,
        InputKey::END => InputKey::NUMPAD1,
        InputKey::PRIOR => InputKey::NUMPAD9,
        InputKey::NEXT => InputKey::NUMPAD3,
        InputKey::LEFT => InputKey::NUMPAD4,
        InputKey::RIGHT => InputKey::NUMPAD6,
        InputKey::UP => InputKey::NUMPAD8,
        InputKey::DOWN => InputKey::NUMPAD2,
        InputKey::CLEAR => InputKey::NUMPAD5,
        _ => return None,
    };
    Some(alias)
}
