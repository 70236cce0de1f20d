//! Unified key space and polled button state
//!
//! Keyboard virtual keys, mouse buttons and gamepad buttons share a single
//! 0-255 identifier space so that one table can answer "is this down?" for
//! any of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier for a key or button
///
/// The space is open: codes without a named constant are still valid
/// identifiers and are passed through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct InputKey(u8);

macro_rules! input_keys {
    ($($name:ident = $code:literal),* $(,)?) => {
        impl InputKey {
            $(pub const $name: Self = Self($code);)*

            /// Returns the canonical name of this key, if it has one
            pub fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($code => Some(stringify!($name)),)*
                    _ => None,
                }
            }

            /// Looks up a key by its canonical name (case-insensitive)
            pub fn from_name(name: &str) -> Option<Self> {
                let name = name.trim();
                $(
                    if name.eq_ignore_ascii_case(stringify!($name)) {
                        return Some(Self::$name);
                    }
                )*
                None
            }
        }
    };
}

input_keys! {
    INVALID = 0x00,

    LBUTTON = 0x01,
    RBUTTON = 0x02,
    CANCEL = 0x03,
    MBUTTON = 0x04,
    NUMPAD_ENTER = 0x07,
    BACK = 0x08,
    TAB = 0x09,
    CLEAR = 0x0C,
    RETURN = 0x0D,
    SHIFT = 0x10,
    CONTROL = 0x11,
    MENU = 0x12,
    PAUSE = 0x13,
    CAPITAL = 0x14,
    ESCAPE = 0x1B,
    CONVERT = 0x1C,
    NONCONVERT = 0x1D,
    ACCEPT = 0x1E,
    MODECHANGE = 0x1F,
    SPACE = 0x20,
    PRIOR = 0x21,
    NEXT = 0x22,
    END = 0x23,
    HOME = 0x24,
    LEFT = 0x25,
    UP = 0x26,
    RIGHT = 0x27,
    DOWN = 0x28,
    SELECT = 0x29,
    PRINT = 0x2A,
    SNAPSHOT = 0x2C,
    INSERT = 0x2D,
    DELETE = 0x2E,
    HELP = 0x2F,
    DIGIT_0 = 0x30,
    DIGIT_1 = 0x31,
    DIGIT_2 = 0x32,
    DIGIT_3 = 0x33,
    DIGIT_4 = 0x34,
    DIGIT_5 = 0x35,
    DIGIT_6 = 0x36,
    DIGIT_7 = 0x37,
    DIGIT_8 = 0x38,
    DIGIT_9 = 0x39,
    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,
    LWIN = 0x5B,
    RWIN = 0x5C,
    APPS = 0x5D,
    SLEEP = 0x5F,
    NUMPAD0 = 0x60,
    NUMPAD1 = 0x61,
    NUMPAD2 = 0x62,
    NUMPAD3 = 0x63,
    NUMPAD4 = 0x64,
    NUMPAD5 = 0x65,
    NUMPAD6 = 0x66,
    NUMPAD7 = 0x67,
    NUMPAD8 = 0x68,
    NUMPAD9 = 0x69,
    NUMPAD_MULTIPLY = 0x6A,
    NUMPAD_ADD = 0x6B,
    NUMPAD_SEPARATOR = 0x6C,
    NUMPAD_SUBTRACT = 0x6D,
    NUMPAD_DECIMAL = 0x6E,
    NUMPAD_DIVIDE = 0x6F,
    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    F13 = 0x7C,
    F14 = 0x7D,
    F15 = 0x7E,
    F16 = 0x7F,
    F17 = 0x80,
    F18 = 0x81,
    F19 = 0x82,
    F20 = 0x83,
    F21 = 0x84,
    F22 = 0x85,
    F23 = 0x86,
    F24 = 0x87,
    NAVIGATION_VIEW = 0x88,
    NAVIGATION_MENU = 0x89,
    NAVIGATION_UP = 0x8A,
    NAVIGATION_DOWN = 0x8B,
    NAVIGATION_LEFT = 0x8C,
    NAVIGATION_RIGHT = 0x8D,
    NAVIGATION_ACCEPT = 0x8E,
    NAVIGATION_CANCEL = 0x8F,
    NUMLOCK = 0x90,
    SCROLL = 0x91,
    LEFT_SHIFT = 0xA0,
    RIGHT_SHIFT = 0xA1,
    LEFT_CTRL = 0xA2,
    RIGHT_CTRL = 0xA3,
    LEFT_ALT = 0xA4,
    RIGHT_ALT = 0xA5,
    MOUSE0 = 0xB0,
    MOUSE1 = 0xB1,
    MOUSE2 = 0xB2,
    MOUSE3 = 0xB3,
    MOUSE4 = 0xB4,
    MOUSE5 = 0xB5,
    MOUSE6 = 0xB6,
    MOUSE7 = 0xB7,
    MOUSE8 = 0xB8,
    MOUSE9 = 0xB9,
    MOUSE10 = 0xBA,
    MOUSE11 = 0xBB,
    MOUSE12 = 0xBC,
    MOUSE13 = 0xBD,
    MOUSE14 = 0xBE,
    MOUSE15 = 0xBF,
    MINUS = 0xC0,
    EQUAL = 0xC1,
    LBRACKET = 0xC2,
    RBRACKET = 0xC3,
    SEMICOLON = 0xC4,
    APOSTROPHE = 0xC5,
    COMMA = 0xC6,
    PERIOD = 0xC7,
    SLASH = 0xC8,
    BACKSLASH = 0xC9,
    GRAVE = 0xCA,
    PAD_A = 0xD0,
    PAD_B = 0xD1,
    PAD_X = 0xD2,
    PAD_Y = 0xD3,
    PAD_START = 0xD4,
    PAD_BACK = 0xD5,
    PAD_DIGITAL_UP = 0xD6,
    PAD_DIGITAL_DOWN = 0xD7,
    PAD_DIGITAL_LEFT = 0xD8,
    PAD_DIGITAL_RIGHT = 0xD9,
    PAD_LEFT_THUMB = 0xDA,
    PAD_RIGHT_THUMB = 0xDB,
    PAD_LEFT_SHOULDER = 0xDC,
    PAD_RIGHT_SHOULDER = 0xDD,
    PAD_LEFT_TRIGGER = 0xDE,
    PAD_RIGHT_TRIGGER = 0xDF,
    MAX = 0xFF,
}

impl InputKey {
    // Face-button aliases for the other common gamepad layout
    pub const PAD_CROSS: Self = Self::PAD_A;
    pub const PAD_CIRCLE: Self = Self::PAD_B;
    pub const PAD_SQUARE: Self = Self::PAD_X;
    pub const PAD_TRIANGLE: Self = Self::PAD_Y;

    /// Wraps a raw code
    pub const fn from_code(code: u8) -> Self {
        Self(code)
    }

    /// Raw code of this key
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Returns true for the reserved invalid key
    pub const fn is_invalid(self) -> bool {
        self.0 == 0
    }
}

impl From<u8> for InputKey {
    fn from(code: u8) -> Self {
        Self(code)
    }
}

impl From<InputKey> for u8 {
    fn from(key: InputKey) -> Self {
        key.0
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Error returned when a key name cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name `{0}`")]
pub struct UnknownKeyName(pub String);

impl FromStr for InputKey {
    type Err = UnknownKeyName;

    /// Accepts canonical names (`W`, `LEFT_SHIFT`) or hex codes (`0x57`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(key) = Self::from_name(s) {
            return Ok(key);
        }

        s.trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"))
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(Self)
            .ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

impl Serialize for InputKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InputKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Number of slots in the key space
pub const NUM_KEYS: usize = u8::MAX as usize + 1;

/// Down/up state of every key, indexed by [`InputKey`]
#[derive(Clone, PartialEq, Eq)]
pub struct ButtonsState {
    state: [bool; NUM_KEYS],
}

impl ButtonsState {
    /// Creates a table with every key up
    pub fn new() -> Self {
        Self {
            state: [false; NUM_KEYS],
        }
    }

    /// Returns true if the key is currently down
    pub fn is_down(&self, key: InputKey) -> bool {
        self.state[usize::from(key.0)]
    }

    /// Stores a new state for `key` and reports whether it changed
    ///
    /// The invalid key is never stored; setting it is always a no-op.
    pub fn set(&mut self, key: InputKey, down: bool) -> bool {
        if key.is_invalid() {
            return false;
        }
        let slot = &mut self.state[usize::from(key.0)];
        std::mem::replace(slot, down) != down
    }

    /// Iterates over every key currently down
    pub fn pressed(&self) -> impl Iterator<Item = InputKey> + '_ {
        self.state
            .iter()
            .enumerate()
            .filter(|(_, down)| **down)
            .map(|(code, _)| InputKey(code as u8))
    }

    /// Marks every key as up
    pub fn clear(&mut self) {
        self.state = [false; NUM_KEYS];
    }
}

impl Default for ButtonsState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ButtonsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.pressed()).finish()
    }
}

impl std::ops::Index<InputKey> for ButtonsState {
    type Output = bool;

    fn index(&self, key: InputKey) -> &bool {
        &self.state[usize::from(key.0)]
    }
}
