//! Integration tests for the input pipeline: sink chain to collector to camera

use freelook::app::input::raw::{KeyFlags, MouseButtonFlags, RawKeyboard, RawMouse};
use freelook::app::input::{
    CursorCapture, CursorGlyph, CursorPlatform, InputCollector, InputEvent, InputKey,
    RawInputPacket, ScreenArea, SinkChain, WindowHandle, WindowMessage,
};
use freelook::sim::{Camera, FlyController};
use glam::{IVec2, Vec3};

const WINDOW: WindowHandle = WindowHandle(1);

/// Platform that records every cursor operation
#[derive(Default)]
struct RecordingPlatform {
    cursor: IVec2,
    moves: Vec<IVec2>,
    glyphs: Vec<CursorGlyph>,
}

impl CursorPlatform for RecordingPlatform {
    fn cursor_position(&self) -> IVec2 {
        self.cursor
    }

    fn set_cursor_position(&mut self, pos: IVec2) {
        self.cursor = pos;
        self.moves.push(pos);
    }

    fn set_cursor_glyph(&mut self, glyph: CursorGlyph) {
        self.glyphs.push(glyph);
    }

    fn screen_size(&self, area: ScreenArea) -> IVec2 {
        match area {
            ScreenArea::Primary => IVec2::new(1000, 1000),
            ScreenArea::VirtualDesktop => IVec2::new(2000, 1000),
        }
    }

    fn message_cursor_position(&self, _window: WindowHandle) -> IVec2 {
        IVec2::new(10, 20)
    }

    fn client_center(&self, window: WindowHandle) -> Option<IVec2> {
        (window == WINDOW).then_some(IVec2::new(640, 360))
    }
}

type Collector = InputCollector<RecordingPlatform>;

struct Harness {
    sinks: SinkChain,
    camera: Camera,
    controller: FlyController,
}

impl Harness {
    fn new(captured: bool) -> Self {
        let mut collector = InputCollector::new(RecordingPlatform {
            cursor: IVec2::new(300, 200),
            ..Default::default()
        });
        if captured {
            collector.hide_cursor();
        }

        let mut sinks = SinkChain::new();
        sinks.push(Box::new(collector));

        Self {
            sinks,
            camera: Camera::new(),
            controller: FlyController::default(),
        }
    }

    fn collector(&mut self) -> &mut Collector {
        self.sinks
            .find_mut::<Collector>()
            .expect("collector registered")
    }

    fn send(&mut self, packet: RawInputPacket) -> bool {
        self.sinks
            .dispatch(WINDOW, &WindowMessage::RawInput(packet))
    }

    fn key(&mut self, key: InputKey, down: bool) {
        let flags = if down { KeyFlags::empty() } else { KeyFlags::BREAK };
        self.send(RawInputPacket::keyboard(RawKeyboard::new(
            u16::from(u8::from(key)),
            0,
            flags,
        )));
    }

    /// Runs one frame and returns the events it consumed
    fn frame(&mut self, dt: f32) -> Vec<InputEvent> {
        self.sinks.dispatch(WINDOW, &WindowMessage::SetCursor);

        let collector = self
            .sinks
            .find_mut::<Collector>()
            .expect("collector registered");
        let events = collector.flush_events();
        let buttons = collector.buttons().clone();
        self.controller
            .update(&events, &buttons, collector, &mut self.camera, dt);
        events
    }
}

#[test]
fn test_default_camera_looks_down_negative_z() {
    let camera = Camera::new();
    assert!(camera.front().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    assert_eq!(camera.position(), Vec3::new(0.0, 0.0, -3.0));
    assert_eq!(camera.zoom(), 45.0);
}

#[test]
fn test_repeated_key_down_emits_one_event() {
    let mut harness = Harness::new(true);
    harness.key(InputKey::W, true);
    harness.key(InputKey::W, true);
    harness.key(InputKey::W, true);

    let events = harness.frame(0.0);
    assert_eq!(events, vec![InputEvent::KeyDown { key: InputKey::W }]);
    assert!(harness.collector().is_down(InputKey::W));
}

#[test]
fn test_flush_drains_pending_events() {
    let mut harness = Harness::new(true);
    harness.key(InputKey::A, true);
    harness.key(InputKey::A, false);

    assert_eq!(harness.frame(0.0).len(), 2);
    assert!(harness.frame(0.0).is_empty());
}

#[test]
fn test_held_key_moves_camera_while_captured() {
    let mut harness = Harness::new(true);
    harness.key(InputKey::W, true);

    harness.frame(1.0);
    // Default speed 2.5 along -Z
    assert!(harness
        .camera
        .position()
        .abs_diff_eq(Vec3::new(0.0, 0.0, -5.5), 1e-4));

    harness.key(InputKey::W, false);
    harness.frame(1.0);
    assert!(harness
        .camera
        .position()
        .abs_diff_eq(Vec3::new(0.0, 0.0, -5.5), 1e-4));
}

#[test]
fn test_released_cursor_ignores_look_and_movement() {
    let mut harness = Harness::new(false);
    harness.key(InputKey::D, true);
    harness.send(RawInputPacket::mouse(RawMouse::relative(50, 50)));

    harness.frame(1.0);
    assert_eq!(harness.camera.position(), Vec3::new(0.0, 0.0, -3.0));
    assert_eq!(harness.camera.yaw(), -90.0);
    assert_eq!(harness.camera.pitch(), 0.0);
}

#[test]
fn test_escape_release_toggles_capture_and_restores_cursor() {
    let mut harness = Harness::new(true);

    // Captured: the cursor is pulled to the window center each frame
    harness.frame(0.0);
    assert_eq!(harness.collector().platform().cursor, IVec2::new(640, 360));
    assert_eq!(harness.collector().platform().moves, vec![IVec2::new(640, 360)]);

    harness.key(InputKey::ESCAPE, true);
    harness.frame(0.0);
    assert!(harness.collector().is_cursor_hidden());

    harness.key(InputKey::ESCAPE, false);
    harness.frame(0.0);
    assert!(!harness.collector().is_cursor_hidden());
    assert_eq!(harness.collector().platform().cursor, IVec2::new(300, 200));

    // The glyph follows on the next cursor update
    harness.frame(0.0);
    assert_eq!(
        harness.collector().platform().glyphs.last(),
        Some(&CursorGlyph::Arrow)
    );

    harness.key(InputKey::ESCAPE, true);
    harness.key(InputKey::ESCAPE, false);
    harness.frame(0.0);
    assert!(harness.collector().is_cursor_hidden());
    harness.frame(0.0);
    assert_eq!(
        harness.collector().platform().glyphs.last(),
        Some(&CursorGlyph::Cross)
    );
}

#[test]
fn test_first_absolute_sample_has_zero_delta() {
    let mut harness = Harness::new(true);
    harness.send(RawInputPacket::mouse(RawMouse::absolute(32768, 32768, false)));
    assert!(harness.frame(0.0).is_empty());

    // 6553.5 of 65535 is a tenth of the 1000 px primary screen
    harness.send(RawInputPacket::mouse(RawMouse::absolute(
        32768 + 6554,
        32768,
        false,
    )));
    let events = harness.frame(0.0);
    assert_eq!(events.len(), 1);
    let InputEvent::MouseMove { pos, delta } = events[0] else {
        panic!("expected a mouse move, got {:?}", events[0]);
    };
    assert_eq!(pos, IVec2::new(10, 20));
    assert_eq!(delta, IVec2::new(100, 0));
}

#[test]
fn test_one_wheel_notch_is_one_step() {
    let mut harness = Harness::new(true);
    harness.send(RawInputPacket::mouse(RawMouse::wheel(120)));

    let events = harness.frame(0.0);
    assert_eq!(events, vec![InputEvent::MouseWheel { delta: 1 }]);
    assert_eq!(harness.camera.zoom(), 35.0);
}

#[test]
fn test_zoom_is_clamped() {
    let mut harness = Harness::new(true);
    harness.send(RawInputPacket::mouse(RawMouse::wheel(-120 * 3)));
    harness.frame(0.0);
    assert_eq!(harness.camera.zoom(), 45.0);

    for _ in 0..10 {
        harness.send(RawInputPacket::mouse(RawMouse::wheel(120)));
    }
    harness.frame(0.0);
    assert_eq!(harness.camera.zoom(), 1.0);
}

#[test]
fn test_pitch_is_clamped() {
    let mut harness = Harness::new(true);
    harness.send(RawInputPacket::mouse(RawMouse::relative(0, -10_000)));
    harness.frame(0.0);
    assert!(harness.camera.pitch().abs() <= 89.0);
    assert!(harness.camera.pitch() > 0.0);

    harness.send(RawInputPacket::mouse(RawMouse::relative(0, 20_000)));
    harness.frame(0.0);
    assert!(harness.camera.pitch().abs() <= 89.0);
    assert!(harness.camera.pitch() < 0.0);
}

#[test]
fn test_mouse_buttons_are_tracked() {
    let mut harness = Harness::new(true);
    harness.send(RawInputPacket::mouse(RawMouse::buttons(
        MouseButtonFlags::BUTTON_1_DOWN,
    )));
    harness.send(RawInputPacket::mouse(RawMouse::buttons(
        MouseButtonFlags::BUTTON_1_DOWN,
    )));

    let events = harness.frame(0.0);
    assert_eq!(
        events,
        vec![InputEvent::MouseDown {
            button: InputKey::LBUTTON
        }]
    );
    assert!(harness.collector().is_down(InputKey::LBUTTON));
}

#[test]
fn test_malformed_packet_is_not_claimed() {
    let mut harness = Harness::new(true);
    let packet = RawInputPacket::new(vec![0u8; 8], 64);

    assert!(!harness.send(packet));
    assert!(harness.frame(0.0).is_empty());
}

#[test]
fn test_focus_reset_releases_held_keys() {
    let mut harness = Harness::new(true);
    harness.key(InputKey::W, true);
    harness.collector().reset();

    assert!(harness.frame(1.0).is_empty());
    assert_eq!(harness.camera.position(), Vec3::new(0.0, 0.0, -3.0));
}
