//! Normalized input events

use glam::IVec2;

use super::keys::InputKey;

/// Input events decoded from raw platform messages
///
/// Events are queued in arrival order and handed out by
/// [`InputCollector::flush_events`](super::InputCollector::flush_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key went from up to down
    KeyDown { key: InputKey },

    /// Key went from down to up
    KeyUp { key: InputKey },

    /// Mouse button went from up to down
    MouseDown { button: InputKey },

    /// Mouse button went from down to up
    MouseUp { button: InputKey },

    /// Pointer moved
    MouseMove {
        /// Cursor position in client-area pixels when the motion arrived
        pos: IVec2,
        /// Motion since the previous sample
        delta: IVec2,
    },

    /// Wheel rotated by a whole number of notches (positive = away from user)
    MouseWheel { delta: i32 },
}

impl InputEvent {
    /// Returns true for the release edge of `key`
    pub fn is_release_of(&self, key: InputKey) -> bool {
        matches!(*self, Self::KeyUp { key: k } | Self::MouseUp { button: k } if k == key)
    }
}
