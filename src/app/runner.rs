//! Main application handler

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, trace, warn};
use winit::application::ApplicationHandler;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use super::config::AppConfig;
use super::cursor::WinitCursor;
use super::input::bridge::{self, Bridge};
use super::input::{CursorCapture, InputCollector, SinkChain, WindowHandle, WindowMessage};
use super::window::{WindowPresence, aspect_ratio, window_attributes_from_config};
use crate::clock::Clock;
use crate::sim::{Camera, FlyController};

type Collector = InputCollector<WinitCursor>;

/// Free-fly camera application
pub struct App {
    config: AppConfig,
    window: Option<Arc<Window>>,
    presence: WindowPresence,
    bridge: Bridge,
    sinks: SinkChain,
    camera: Camera,
    controller: FlyController,
    clock: Clock,
    frame: u64,
}

impl App {
    /// Creates the application with the provided configuration
    pub fn new(config: AppConfig) -> Self {
        info!(profile = %config.profile, "Starting");
        info!(?config.window, "Window configuration");
        debug!(?config.controls.bindings, "Key bindings");

        Self {
            camera: Camera::from_config(&config.camera),
            controller: FlyController::new(&config.controls),
            config,
            window: None,
            presence: WindowPresence::default(),
            bridge: Bridge::new(),
            sinks: SinkChain::new(),
            clock: Clock::new(),
            frame: 0,
        }
    }

    /// Creates the application with configuration loaded from environment
    pub fn from_env() -> Self {
        let config = AppConfig::load_from_env().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load config, using default configuration");
            AppConfig::default()
        });
        Self::new(config)
    }

    fn collector(&mut self) -> Option<&mut Collector> {
        self.sinks.find_mut::<Collector>()
    }

    fn dispatch(&mut self, message: &WindowMessage) -> bool {
        let Some(window) = &self.window else {
            return false;
        };
        let handle = WindowHandle::from(window.id());
        self.sinks.dispatch(handle, message)
    }

    /// Runs one frame: flush input, drive the camera
    fn tick(&mut self) {
        self.clock.next_frame();
        let dt = self.clock.dt();

        let Some(collector) = self.sinks.find_mut::<Collector>() else {
            return;
        };
        let events = collector.flush_events();
        let buttons = collector.buttons().clone();
        self.controller
            .update(&events, &buttons, collector, &mut self.camera, dt);

        self.frame += 1;
        if let Some(window) = &self.window {
            let size = window.inner_size();
            let projection = self.camera.projection_matrix(
                aspect_ratio(size.width, size.height),
                self.config.camera.near,
                self.config.camera.far,
            );
            trace!(
                frame = self.frame,
                elapsed = ?self.clock.elapsed(),
                dt,
                events = events.len(),
                position = ?self.camera.position(),
                front = ?self.camera.front(),
                zoom = self.camera.zoom(),
                view = ?self.camera.view_matrix(),
                ?projection,
                "Frame"
            );
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = window_attributes_from_config(&self.config.window);
        match event_loop.create_window(window_attributes) {
            Ok(window) => {
                let size = window.inner_size();
                info!(
                    window.width = size.width,
                    window.height = size.height,
                    "Window created successfully"
                );

                self.presence.set_focused(window.has_focus());

                let window = Arc::new(window);
                let mut collector = InputCollector::new(WinitCursor::new(Arc::clone(&window)));
                if self.config.controls.start_captured {
                    collector.hide_cursor();
                }
                self.sinks.push(Box::new(collector));
                self.window = Some(window);
                self.clock = Clock::new();
            }
            Err(e) => {
                error!(error = %e, "Failed to create window");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match &event {
            WindowEvent::CursorMoved { position, .. } => {
                self.presence.set_hovered(true);
                if let Some(collector) = self.collector() {
                    collector.platform_mut().set_client_cursor(*position);
                }
            }
            WindowEvent::CursorEntered { .. } => self.presence.set_hovered(true),
            WindowEvent::CursorLeft { .. } => self.presence.set_hovered(false),
            WindowEvent::Focused(true) => self.presence.set_focused(true),
            WindowEvent::Focused(false) => {
                debug!("Focus lost, releasing held keys");
                self.presence.set_focused(false);
                self.bridge.reset();
                if let Some(collector) = self.collector() {
                    collector.reset();
                }
            }
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
                return;
            }
            _ => {}
        }

        if let Some(message) = bridge::window_message(&event) {
            self.dispatch(&message);
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(message) = self.bridge.device_message(&event) {
            self.dispatch(&message);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Recenter (or release) the cursor while the pointer is over the focused window
        if self.presence.wants_cursor_updates() {
            self.dispatch(&WindowMessage::SetCursor);
        }

        self.tick();

        if self.config.controls.frame_sleep_ms > 0 {
            std::thread::sleep(Duration::from_millis(self.config.controls.frame_sleep_ms));
        }
    }
}
