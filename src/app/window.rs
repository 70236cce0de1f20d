//! Window configuration and management

use winit::dpi::LogicalSize;
use winit::window::{Fullscreen, WindowAttributes};

use super::config::WindowConfig;

/// Creates window attributes from configuration
pub fn window_attributes_from_config(config: &WindowConfig) -> WindowAttributes {
    let mut attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_decorations(config.decorated);

    if config.fullscreen {
        attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    attrs
}

/// Width over height, or 1.0 for a degenerate size
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if width == 0 || height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// Focus and hover state of the window
///
/// The cursor is only managed while the pointer is over the focused window,
/// so a captured cursor is not pulled back after the user switches away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPresence {
    focused: bool,
    hovered: bool,
}

impl WindowPresence {
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    /// Whether the window should receive cursor updates this frame
    pub fn wants_cursor_updates(&self) -> bool {
        self.focused && self.hovered
    }
}
