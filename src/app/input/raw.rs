//! Raw-input packet layout and decoding
//!
//! A packet is a fixed header followed by a device-specific payload, laid out
//! the way HID raw-input reports are: the header names the device kind and the
//! total packet size, the payload carries either a keyboard or a mouse record.

use std::mem::size_of;

use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};
use thiserror::Error;

/// Header `kind` for mouse payloads
pub const RIM_TYPEMOUSE: u32 = 0;
/// Header `kind` for keyboard payloads
pub const RIM_TYPEKEYBOARD: u32 = 1;

/// Raw wheel units per notch
pub const WHEEL_DELTA: i32 = 120;

/// Full scale of absolute pointer coordinates
pub const ABSOLUTE_RANGE: f32 = 65535.0;

bitflags! {
    /// Keystroke flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct KeyFlags: u16 {
        /// Key released ("break" scan code)
        const BREAK = 0x0001;
        /// Scan code carried the 0xE0 prefix
        const E0 = 0x0002;
        /// Scan code carried the 0xE1 prefix
        const E1 = 0x0004;
    }
}

bitflags! {
    /// Pointer motion flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseMoveFlags: u16 {
        /// Coordinates are absolute, 0..=65535 across the screen
        const ABSOLUTE = 0x0001;
        /// Absolute coordinates span the whole virtual desktop
        const VIRTUAL_DESKTOP = 0x0002;
    }
}

bitflags! {
    /// Button transitions and wheel presence reported by one mouse record
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MouseButtonFlags: u16 {
        const BUTTON_1_DOWN = 0x0001;
        const BUTTON_1_UP = 0x0002;
        const BUTTON_2_DOWN = 0x0004;
        const BUTTON_2_UP = 0x0008;
        const BUTTON_3_DOWN = 0x0010;
        const BUTTON_3_UP = 0x0020;
        const BUTTON_4_DOWN = 0x0040;
        const BUTTON_4_UP = 0x0080;
        const BUTTON_5_DOWN = 0x0100;
        const BUTTON_5_UP = 0x0200;
        const WHEEL = 0x0400;
    }
}

/// Packet header
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawInputHeader {
    /// [`RIM_TYPEMOUSE`] or [`RIM_TYPEKEYBOARD`]
    pub kind: u32,
    /// Total packet size in bytes, header included
    pub size: u32,
    /// Opaque source device handle
    pub device: u64,
}

/// Keyboard record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawKeyboard {
    pub make_code: u16,
    pub flags: u16,
    pub reserved: u16,
    pub vkey: u16,
    pub message: u32,
    pub extra_information: u32,
}

impl RawKeyboard {
    /// Builds a keystroke record
    pub fn new(vkey: u16, make_code: u16, flags: KeyFlags) -> Self {
        Self {
            make_code,
            flags: flags.bits(),
            vkey,
            ..Self::default()
        }
    }

    pub fn key_flags(&self) -> KeyFlags {
        KeyFlags::from_bits_truncate(self.flags)
    }
}

/// Mouse record
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct RawMouse {
    pub flags: u16,
    pub button_flags: u16,
    pub button_data: u16,
    pub reserved: u16,
    pub raw_buttons: u32,
    pub last_x: i32,
    pub last_y: i32,
    pub extra_information: u32,
}

impl RawMouse {
    /// Relative motion record
    pub fn relative(dx: i32, dy: i32) -> Self {
        Self {
            last_x: dx,
            last_y: dy,
            ..Self::default()
        }
    }

    /// Absolute motion record; `x`/`y` are in 0..=65535 screen units
    pub fn absolute(x: i32, y: i32, virtual_desktop: bool) -> Self {
        let mut flags = MouseMoveFlags::ABSOLUTE;
        flags.set(MouseMoveFlags::VIRTUAL_DESKTOP, virtual_desktop);
        Self {
            flags: flags.bits(),
            last_x: x,
            last_y: y,
            ..Self::default()
        }
    }

    /// Wheel record; `raw_delta` is in [`WHEEL_DELTA`] units
    pub fn wheel(raw_delta: i16) -> Self {
        Self {
            button_flags: MouseButtonFlags::WHEEL.bits(),
            button_data: raw_delta as u16,
            ..Self::default()
        }
    }

    /// Button transition record
    pub fn buttons(flags: MouseButtonFlags) -> Self {
        Self {
            button_flags: flags.bits(),
            ..Self::default()
        }
    }

    pub fn move_flags(&self) -> MouseMoveFlags {
        MouseMoveFlags::from_bits_truncate(self.flags)
    }

    pub fn button_flags(&self) -> MouseButtonFlags {
        MouseButtonFlags::from_bits_truncate(self.button_flags)
    }

    /// Signed wheel rotation in raw units
    pub fn wheel_delta(&self) -> i16 {
        self.button_data as i16
    }
}

/// Decoded packet payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    Keyboard(RawKeyboard),
    Mouse(RawMouse),
}

/// Reasons a raw-input packet is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawInputError {
    #[error("raw input size mismatch: reported {reported} bytes, delivered {delivered}")]
    PayloadSize { reported: usize, delivered: usize },

    #[error("raw input truncated: need {needed} bytes, delivered {delivered}")]
    Truncated { needed: usize, delivered: usize },

    #[error("raw input from unknown device kind {0}")]
    UnknownDeviceKind(u32),
}

/// Raw-input packet as delivered by the windowing layer
///
/// `reported_size` is the size the platform announced for the packet; it must
/// agree with the bytes actually delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInputPacket {
    bytes: Vec<u8>,
    reported_size: usize,
}

impl RawInputPacket {
    /// Wraps bytes received from the platform
    pub fn new(bytes: Vec<u8>, reported_size: usize) -> Self {
        Self {
            bytes,
            reported_size,
        }
    }

    /// Encodes a keyboard record
    pub fn keyboard(record: RawKeyboard) -> Self {
        Self::encode(RIM_TYPEKEYBOARD, bytemuck::bytes_of(&record))
    }

    /// Encodes a mouse record
    pub fn mouse(record: RawMouse) -> Self {
        Self::encode(RIM_TYPEMOUSE, bytemuck::bytes_of(&record))
    }

    fn encode(kind: u32, payload: &[u8]) -> Self {
        let size = size_of::<RawInputHeader>() + payload.len();
        let header = RawInputHeader {
            kind,
            size: size as u32,
            device: 0,
        };

        let mut bytes = Vec::with_capacity(size);
        bytes.extend_from_slice(bytemuck::bytes_of(&header));
        bytes.extend_from_slice(payload);
        Self::new(bytes, size)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn reported_size(&self) -> usize {
        self.reported_size
    }

    /// Validates sizes and extracts the payload
    pub fn decode(&self) -> Result<RawInput, RawInputError> {
        let delivered = self.bytes.len();
        if self.reported_size != delivered {
            return Err(RawInputError::PayloadSize {
                reported: self.reported_size,
                delivered,
            });
        }

        let header: RawInputHeader = read_at(&self.bytes, 0)?;
        if header.size as usize != delivered {
            return Err(RawInputError::PayloadSize {
                reported: header.size as usize,
                delivered,
            });
        }

        let offset = size_of::<RawInputHeader>();
        match header.kind {
            RIM_TYPEKEYBOARD => read_at(&self.bytes, offset).map(RawInput::Keyboard),
            RIM_TYPEMOUSE => read_at(&self.bytes, offset).map(RawInput::Mouse),
            kind => Err(RawInputError::UnknownDeviceKind(kind)),
        }
    }
}

fn read_at<T: Pod>(bytes: &[u8], offset: usize) -> Result<T, RawInputError> {
    let needed = offset + size_of::<T>();
    bytes
        .get(offset..needed)
        .map(bytemuck::pod_read_unaligned::<T>)
        .ok_or(RawInputError::Truncated {
            needed,
            delivered: bytes.len(),
        })
}
