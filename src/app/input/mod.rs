//! Input handling system
//!
//! Decodes raw platform input into an ordered, edge-triggered event stream
//! and a polled button table, and manages cursor capture.
//!
//! # Architecture
//!
//! ```text
//! winit events → bridge → WindowMessage → SinkChain → InputCollector
//!                                                         ↓
//!                                        flush_events() once per frame
//!                                        buttons() polled between frames
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let mut sinks = SinkChain::new();
//! sinks.push(Box::new(InputCollector::new(platform)));
//!
//! // For every platform message
//! sinks.dispatch(window, &message);
//!
//! // Each frame
//! let collector = sinks.find_mut::<InputCollector<MyPlatform>>().unwrap();
//! for event in collector.flush_events() {
//!     // ...
//! }
//! ```

pub mod bridge;
mod collector;
mod events;
mod handler;
pub mod keyboard;
mod keys;
mod platform;
pub mod raw;

// Re-export public API
pub use collector::{CursorCapture, InputCollector};
pub use events::InputEvent;
pub use handler::{SinkChain, WindowHandle, WindowMessage, WindowMessageSink};
pub use keys::{ButtonsState, InputKey, NUM_KEYS, UnknownKeyName};
pub use platform::{CursorGlyph, CursorPlatform, ScreenArea};
pub use raw::{RawInputError, RawInputPacket};
