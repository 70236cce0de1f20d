//! Cursor and screen services the collector needs from the windowing layer

use glam::IVec2;

use super::handler::WindowHandle;

/// Cursor shape shown over the client area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorGlyph {
    /// Default pointer, used while the cursor is free
    Arrow,
    /// Crosshair, used while the cursor is captured
    Cross,
}

/// Which screen extent absolute pointer coordinates are scaled against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenArea {
    Primary,
    VirtualDesktop,
}

/// Windowing-layer primitives used by [`InputCollector`](super::InputCollector)
///
/// All positions are physical pixels. Screen coordinates unless stated
/// otherwise.
pub trait CursorPlatform {
    /// Current OS cursor position
    fn cursor_position(&self) -> IVec2;

    /// Moves the OS cursor
    fn set_cursor_position(&mut self, pos: IVec2);

    /// Changes the cursor shape
    fn set_cursor_glyph(&mut self, glyph: CursorGlyph);

    /// Size of the given screen area
    fn screen_size(&self, area: ScreenArea) -> IVec2;

    /// Cursor position at the time the current message was generated, in
    /// the client coordinates of `window`
    fn message_cursor_position(&self, window: WindowHandle) -> IVec2;

    /// Center of the client area of `window`, or `None` if the window is unknown
    fn client_center(&self, window: WindowHandle) -> Option<IVec2>;
}
