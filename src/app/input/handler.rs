//! Window message sinks
//!
//! Components that want first refusal on platform messages implement
//! [`WindowMessageSink`] and are registered on a [`SinkChain`].

use std::any::Any;

use tracing::debug;

use super::raw::RawInputPacket;

/// Opaque identifier of the window a message was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub u64);

impl From<winit::window::WindowId> for WindowHandle {
    fn from(id: winit::window::WindowId) -> Self {
        Self(u64::from(id))
    }
}

/// Platform message delivered to sinks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowMessage {
    /// Raw HID input packet
    RawInput(RawInputPacket),

    /// The platform asks which cursor to show over the client area
    SetCursor,

    /// Any other message, identified by its numeric id
    Other(u32),
}

/// Trait for components consuming platform messages
pub trait WindowMessageSink {
    /// Name of this sink for debugging
    fn name(&self) -> &str;

    /// Handle a message
    ///
    /// # Returns
    /// * `true` if the message was consumed (later sinks do not see it)
    /// * `false` to let the next sink, and finally the platform, handle it
    fn handle_window_message(&mut self, window: WindowHandle, message: &WindowMessage) -> bool;

    /// Downcast to concrete type for accessing sink-specific methods
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Ordered list of sinks
///
/// Unlike priority-sorted routing, sinks run in the order they were pushed.
#[derive(Default)]
pub struct SinkChain {
    sinks: Vec<Box<dyn WindowMessageSink>>,
}

impl SinkChain {
    /// Creates an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a sink
    pub fn push(&mut self, sink: Box<dyn WindowMessageSink>) {
        debug!(sink = sink.name(), position = self.sinks.len(), "Window message sink registered");
        self.sinks.push(sink);
    }

    /// Offers `message` to each sink until one claims it
    pub fn dispatch(&mut self, window: WindowHandle, message: &WindowMessage) -> bool {
        self.sinks
            .iter_mut()
            .any(|sink| sink.handle_window_message(window, message))
    }

    /// Get the first sink of concrete type `T`
    pub fn find_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.sinks
            .iter_mut()
            .find_map(|s| s.as_any_mut().downcast_mut::<T>())
    }
}
