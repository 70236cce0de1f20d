//! winit-backed cursor services

use std::sync::Arc;

use glam::IVec2;
use tracing::warn;
use winit::dpi::PhysicalPosition;
use winit::window::{CursorIcon, Window};

use super::input::{CursorGlyph, CursorPlatform, ScreenArea, WindowHandle};

/// Cursor services for a single winit window
///
/// winit only reports the cursor inside the client area, so the last
/// `CursorMoved` position has to be fed in with
/// [`set_client_cursor`](Self::set_client_cursor).
pub struct WinitCursor {
    window: Arc<Window>,
    handle: WindowHandle,
    client_cursor: IVec2,
    glyph: Option<CursorGlyph>,
    warned_positioning: bool,
}

impl WinitCursor {
    pub fn new(window: Arc<Window>) -> Self {
        let handle = WindowHandle::from(window.id());
        let size = window.inner_size();
        Self {
            window,
            handle,
            client_cursor: IVec2::new(size.width as i32 / 2, size.height as i32 / 2),
            glyph: None,
            warned_positioning: false,
        }
    }

    /// Records the cursor position reported by the window
    pub fn set_client_cursor(&mut self, pos: PhysicalPosition<f64>) {
        self.client_cursor = IVec2::new(pos.x as i32, pos.y as i32);
    }

    fn client_origin(&self) -> IVec2 {
        self.window
            .inner_position()
            .map(|p| IVec2::new(p.x, p.y))
            .unwrap_or(IVec2::ZERO)
    }
}

impl CursorPlatform for WinitCursor {
    fn cursor_position(&self) -> IVec2 {
        self.client_origin() + self.client_cursor
    }

    fn set_cursor_position(&mut self, pos: IVec2) {
        let local = pos - self.client_origin();
        match self
            .window
            .set_cursor_position(PhysicalPosition::new(local.x, local.y))
        {
            Ok(()) => self.client_cursor = local,
            Err(e) => {
                if !self.warned_positioning {
                    warn!(error = %e, "Cursor positioning unsupported, capture will not recenter");
                    self.warned_positioning = true;
                }
            }
        }
    }

    fn set_cursor_glyph(&mut self, glyph: CursorGlyph) {
        if self.glyph == Some(glyph) {
            return;
        }
        let icon = match glyph {
            CursorGlyph::Arrow => CursorIcon::Default,
            CursorGlyph::Cross => CursorIcon::Crosshair,
        };
        self.window.set_cursor(icon);
        self.glyph = Some(glyph);
    }

    fn screen_size(&self, area: ScreenArea) -> IVec2 {
        let fallback = || {
            let size = self.window.inner_size();
            IVec2::new(size.width as i32, size.height as i32)
        };

        match area {
            ScreenArea::Primary => self
                .window
                .primary_monitor()
                .or_else(|| self.window.current_monitor())
                .map(|m| IVec2::new(m.size().width as i32, m.size().height as i32))
                .unwrap_or_else(fallback),
            ScreenArea::VirtualDesktop => {
                let bounds = self.window.available_monitors().fold(None, |acc, m| {
                    let min = IVec2::new(m.position().x, m.position().y);
                    let max = min + IVec2::new(m.size().width as i32, m.size().height as i32);
                    match acc {
                        None => Some((min, max)),
                        Some((lo, hi)) => Some((min.min(lo), max.max(hi))),
                    }
                });
                bounds.map(|(lo, hi)| hi - lo).unwrap_or_else(fallback)
            }
        }
    }

    fn message_cursor_position(&self, _window: WindowHandle) -> IVec2 {
        self.client_cursor
    }

    fn client_center(&self, window: WindowHandle) -> Option<IVec2> {
        if window != self.handle {
            return None;
        }
        let size = self.window.inner_size();
        Some(self.client_origin() + IVec2::new(size.width as i32 / 2, size.height as i32 / 2))
    }
}
