//! Host-level integration tests.
//!
//! These drive casement-core purely through `HostEvent`s, the way a shell
//! would, and check the reported actions, descriptors and rendered scene.

use casement_core::config::Config;
use casement_core::content::{Content, ContentError, FrameBody, RenderContext, FALLBACK_MESSAGE};
use casement_core::event::{HostAction, HostEvent};
use casement_core::render::FrameUpdate;
use casement_core::{Geometry, Host, Position, Size, WindowId, WindowState};
use pretty_assertions::assert_eq;

/// Helper: a host with the default windows on a 1920×1080 viewport.
fn test_host() -> Host {
    let mut config = Config::default();
    config.viewport.width = 1920;
    config.viewport.height = 1080;
    Host::new(config)
}

fn terminal() -> WindowId {
    WindowId::from("terminal")
}

fn photos() -> WindowId {
    WindowId::from("photos")
}

/// Helper: open a window and move it to a known geometry.
fn open_at(host: &mut Host, id: &WindowId, geometry: Geometry) {
    host.handle_event(HostEvent::Open { id: id.clone() });
    let window = host.state.windows.get_mut(id).unwrap();
    window.descriptor.position = geometry.position();
    window.descriptor.size = geometry.size();
}

fn down(host: &mut Host, x: f64, y: f64) -> Vec<HostAction> {
    host.handle_event(HostEvent::PointerDown { x, y })
}

fn motion(host: &mut Host, x: f64, y: f64) -> Vec<HostAction> {
    host.handle_event(HostEvent::PointerMotion { x, y })
}

fn up(host: &mut Host, x: f64, y: f64) -> Vec<HostAction> {
    host.handle_event(HostEvent::PointerUp { x, y })
}

fn state_of(host: &Host, id: &WindowId) -> WindowState {
    host.descriptor(id).unwrap().state
}

struct Exploding;

impl Content for Exploding {
    fn render(&mut self, _ctx: &RenderContext) -> Result<Vec<String>, ContentError> {
        panic!("content exploded");
    }
}

struct PanicOnInput;

impl Content for PanicOnInput {
    fn render(&mut self, _ctx: &RenderContext) -> Result<Vec<String>, ContentError> {
        Ok(vec!["waiting".into()])
    }

    fn input(&mut self, _line: &str) {
        panic!("input handler exploded");
    }
}

// ── Test 1: drag ────────────────────────────────────────────────

#[test]
fn title_bar_drag_follows_pointer_offset() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    assert_eq!(host.active_session(), Some(&terminal()));

    let actions = motion(&mut host, 300.0, 400.0);
    assert_eq!(
        actions,
        vec![HostAction::PositionChanged {
            id: terminal(),
            x: 280,
            y: 390
        }]
    );

    let actions = up(&mut host, 300.0, 400.0);
    assert_eq!(actions, vec![HostAction::SessionEnded { id: terminal() }]);
    assert_eq!(host.descriptor(&terminal()).unwrap().position, Position::new(280, 390));
    assert_eq!(host.active_session(), None);
}

#[test]
fn drag_can_leave_the_viewport() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 200.0, 120.0);
    motion(&mut host, -2000.0, -2000.0);
    up(&mut host, -2000.0, -2000.0);

    assert_eq!(
        host.descriptor(&terminal()).unwrap().position,
        Position::new(-2100, -2020)
    );
}

#[test]
fn motion_without_session_is_ignored() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    assert!(motion(&mut host, 300.0, 300.0).is_empty());
    // Pointer-down on the body starts nothing either.
    down(&mut host, 300.0, 300.0);
    assert!(motion(&mut host, 350.0, 350.0).is_empty());
    assert_eq!(host.active_listeners(), 0);
}

// ── Test 2: resize ──────────────────────────────────────────────

#[test]
fn east_edge_resize_reports_size_only() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 498.0, 250.0);
    let actions = motion(&mut host, 600.0, 250.0);
    assert_eq!(
        actions,
        vec![HostAction::SizeChanged {
            id: terminal(),
            width: 500,
            height: 300
        }]
    );
    up(&mut host, 600.0, 250.0);
    assert_eq!(
        host.descriptor(&terminal()).unwrap().geometry(),
        Geometry::new(100, 100, 500, 300)
    );
}

#[test]
fn west_edge_resize_stops_at_minimum_width() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 101.0, 250.0);
    let actions = motion(&mut host, 650.0, 250.0);
    assert_eq!(
        actions,
        vec![
            HostAction::SizeChanged {
                id: terminal(),
                width: 300,
                height: 300
            },
            HostAction::PositionChanged {
                id: terminal(),
                x: 200,
                y: 100
            },
        ]
    );

    // Further movement past the limit does not move the origin again.
    let actions = motion(&mut host, 900.0, 250.0);
    assert_eq!(
        actions,
        vec![HostAction::SizeChanged {
            id: terminal(),
            width: 300,
            height: 300
        }]
    );
}

#[test]
fn corner_resize_combines_axes() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 499.0, 399.0);
    motion(&mut host, 800.0, 700.0);
    up(&mut host, 800.0, 700.0);

    assert_eq!(
        host.descriptor(&terminal()).unwrap().geometry(),
        Geometry::new(100, 100, 700, 600)
    );
}

#[test]
fn resize_is_bounded_by_viewport_margins() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 499.0, 399.0);
    motion(&mut host, 9000.0, 9000.0);

    assert_eq!(host.descriptor(&terminal()).unwrap().size, Size::new(1870, 980));
}

#[test]
fn viewport_is_read_at_update_time() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 498.0, 250.0);
    host.handle_event(HostEvent::ViewportResized {
        width: 800,
        height: 600,
    });
    motion(&mut host, 9000.0, 250.0);

    assert_eq!(host.descriptor(&terminal()).unwrap().size.width, 750);
}

#[test]
fn far_off_screen_motion_is_clamped() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(-500, 100, 700, 500));

    // East edge strip of a frame hanging off the left side
    down(&mut host, 198.0, 300.0);
    motion(&mut host, 1e19, 300.0);
    assert_eq!(host.descriptor(&terminal()).unwrap().size, Size::new(1870, 500));
    up(&mut host, 1e19, 300.0);

    open_at(&mut host, &photos(), Geometry::new(100, 100, 400, 300));
    down(&mut host, 101.0, 250.0);
    motion(&mut host, -1e19, 250.0);
    assert_eq!(host.descriptor(&photos()).unwrap().size.width, 1870);
    host.state.validate_invariants().expect("Invariants should hold");
}

// ── Test 3: sessions ────────────────────────────────────────────

#[test]
fn end_interaction_is_idempotent() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    motion(&mut host, 150.0, 150.0);
    let before = host.descriptor(&terminal()).unwrap().geometry();

    assert_eq!(host.end_interaction().len(), 1);
    assert!(host.end_interaction().is_empty());
    assert_eq!(host.descriptor(&terminal()).unwrap().geometry(), before);
}

#[test]
fn pointer_leave_ends_stuck_session() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    assert_eq!(host.active_listeners(), 2);

    let actions = host.handle_event(HostEvent::PointerLeave);
    assert_eq!(actions, vec![HostAction::SessionEnded { id: terminal() }]);
    assert_eq!(host.active_listeners(), 0);
    assert!(motion(&mut host, 500.0, 500.0).is_empty());
}

#[test]
fn focus_loss_ends_session() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 498.0, 250.0);
    host.handle_event(HostEvent::FocusLost);
    assert_eq!(host.active_session(), None);
    assert_eq!(host.active_listeners(), 0);
}

#[test]
fn new_pointer_down_ends_previous_session() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));
    open_at(&mut host, &photos(), Geometry::new(700, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    // The up for the first drag never arrives.
    let actions = down(&mut host, 720.0, 110.0);

    assert_eq!(actions, vec![HostAction::SessionEnded { id: terminal() }]);
    assert_eq!(host.active_session(), Some(&photos()));
    assert_eq!(host.active_listeners(), 2);
    host.state.validate_invariants().expect("single session");
}

#[test]
fn minimizing_the_dragged_window_releases_capture() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    let actions = host.handle_event(HostEvent::Minimize { id: terminal() });

    assert_eq!(
        actions,
        vec![
            HostAction::SessionEnded { id: terminal() },
            HostAction::Minimized { id: terminal() },
        ]
    );
    assert_eq!(host.active_listeners(), 0);
}

// ── Test 4: chrome controls and lifecycle ───────────────────────

#[test]
fn control_buttons_use_click_semantics() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    // Close button spans x 466..490, y 108..132.
    down(&mut host, 470.0, 115.0);
    assert_eq!(host.active_session(), None);
    // Released elsewhere: nothing happens.
    assert!(up(&mut host, 300.0, 300.0).is_empty());
    assert_eq!(state_of(&host, &terminal()), WindowState::Open);

    down(&mut host, 470.0, 115.0);
    let actions = up(&mut host, 471.0, 116.0);
    assert_eq!(actions, vec![HostAction::Closed { id: terminal() }]);
    assert_eq!(state_of(&host, &terminal()), WindowState::Closed);
}

#[test]
fn maximize_round_trip_restores_geometry() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    // Maximize button spans x 434..458.
    down(&mut host, 440.0, 115.0);
    let actions = up(&mut host, 440.0, 115.0);
    assert_eq!(
        actions,
        vec![HostAction::MaximizeToggled {
            id: terminal(),
            maximized: true
        }]
    );

    let scene = host.render();
    let frame = scene.frame(&terminal()).unwrap();
    assert!(frame.maximized);
    assert_eq!(frame.bounds, Geometry::new(0, 0, 1920, 1080 - 48));

    // Maximized frames cannot be dragged.
    down(&mut host, 300.0, 20.0);
    motion(&mut host, 600.0, 400.0);
    up(&mut host, 600.0, 400.0);

    host.handle_event(HostEvent::ToggleMaximize { id: terminal() });
    assert_eq!(state_of(&host, &terminal()), WindowState::Open);
    assert_eq!(
        host.descriptor(&terminal()).unwrap().geometry(),
        Geometry::new(100, 100, 400, 300)
    );
}

#[test]
fn taskbar_chip_toggles_minimized() {
    let mut host = test_host();
    host.handle_event(HostEvent::Open { id: photos() });

    let actions = host.handle_event(HostEvent::TaskbarToggle { id: photos() });
    assert_eq!(actions, vec![HostAction::Minimized { id: photos() }]);
    let scene = host.render();
    assert!(scene.frame(&photos()).is_none());
    assert!(scene.chip(&photos()).unwrap().minimized);

    let actions = host.handle_event(HostEvent::TaskbarToggle { id: photos() });
    assert_eq!(actions, vec![HostAction::Restored { id: photos() }]);
    assert!(host.render().frame(&photos()).is_some());
}

#[test]
fn restoring_a_minimized_maximized_window_lands_open() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));
    host.handle_event(HostEvent::ToggleMaximize { id: terminal() });

    host.handle_event(HostEvent::TaskbarToggle { id: terminal() });
    let actions = host.handle_event(HostEvent::TaskbarToggle { id: terminal() });

    assert_eq!(actions, vec![HostAction::Restored { id: terminal() }]);
    assert_eq!(state_of(&host, &terminal()), WindowState::Open);
    assert_eq!(
        host.descriptor(&terminal()).unwrap().geometry(),
        Geometry::new(100, 100, 400, 300)
    );
}

#[test]
fn taskbar_lists_every_non_closed_window() {
    let mut host = test_host();
    host.handle_event(HostEvent::Open { id: terminal() });
    host.handle_event(HostEvent::ToggleMaximize { id: terminal() });
    host.handle_event(HostEvent::Open { id: photos() });
    host.handle_event(HostEvent::Minimize { id: photos() });

    let labels: Vec<_> = host
        .taskbar()
        .into_iter()
        .map(|chip| (chip.label, chip.minimized))
        .collect();
    assert_eq!(
        labels,
        vec![("PowerShell".to_string(), false), ("Photos".to_string(), true)]
    );

    host.handle_event(HostEvent::Close { id: terminal() });
    assert_eq!(host.taskbar().len(), 1);
}

#[test]
fn desktop_open_reopens_with_last_geometry() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));

    down(&mut host, 120.0, 110.0);
    motion(&mut host, 220.0, 210.0);
    up(&mut host, 220.0, 210.0);
    host.handle_event(HostEvent::Close { id: terminal() });

    let actions = host.handle_event(HostEvent::Open { id: terminal() });
    assert_eq!(actions, vec![HostAction::Opened { id: terminal() }]);
    assert_eq!(
        host.descriptor(&terminal()).unwrap().geometry(),
        Geometry::new(200, 200, 400, 300)
    );

    // Opening an already open window changes nothing.
    assert!(host.handle_event(HostEvent::Open { id: terminal() }).is_empty());
}

#[test]
fn invalid_transitions_are_noops() {
    let mut host = test_host();

    assert!(host.handle_event(HostEvent::Close { id: terminal() }).is_empty());
    assert!(host.handle_event(HostEvent::Minimize { id: terminal() }).is_empty());
    assert!(host
        .handle_event(HostEvent::ToggleMaximize { id: terminal() })
        .is_empty());
    assert!(host
        .handle_event(HostEvent::TaskbarToggle { id: terminal() })
        .is_empty());
    assert!(host
        .handle_event(HostEvent::Open {
            id: WindowId::from("nope")
        })
        .is_empty());
    assert_eq!(state_of(&host, &terminal()), WindowState::Closed);
}

// ── Test 5: rendering and error isolation ───────────────────────

#[test]
fn failing_content_is_isolated_to_its_frame() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));
    open_at(&mut host, &photos(), Geometry::new(700, 100, 400, 300));
    assert!(host.replace_content(&photos(), Box::new(Exploding)));

    let scene = host.render();
    assert_eq!(
        scene.frame(&photos()).unwrap().body,
        FrameBody::Fallback(FALLBACK_MESSAGE.to_string())
    );
    assert!(!scene.frame(&terminal()).unwrap().body.is_fallback());
    assert!(host.state.windows[&photos()].content_failed());
    assert!(!host.state.windows[&terminal()].content_failed());

    // The sibling still responds to pointer input.
    down(&mut host, 120.0, 110.0);
    motion(&mut host, 140.0, 130.0);
    up(&mut host, 140.0, 130.0);
    assert_eq!(
        host.descriptor(&terminal()).unwrap().position,
        Position::new(120, 120)
    );

    // The failed frame itself is still draggable.
    down(&mut host, 720.0, 110.0);
    motion(&mut host, 820.0, 110.0);
    up(&mut host, 820.0, 110.0);
    assert_eq!(host.descriptor(&photos()).unwrap().position, Position::new(800, 100));

    // Minimizing unmounts the frame and clears the failure.
    host.handle_event(HostEvent::Minimize { id: photos() });
    assert!(!host.state.windows[&photos()].content_failed());
}

#[test]
fn panicking_input_is_isolated_to_its_frame() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));
    open_at(&mut host, &photos(), Geometry::new(700, 100, 400, 300));
    host.replace_content(&photos(), Box::new(PanicOnInput));

    let actions = host.handle_event(HostEvent::Submit {
        id: photos(),
        line: "hello".into(),
    });
    assert!(actions.is_empty());

    let scene = host.render();
    assert!(scene.frame(&photos()).unwrap().body.is_fallback());
    assert!(!scene.frame(&terminal()).unwrap().body.is_fallback());

    host.handle_event(HostEvent::Submit {
        id: terminal(),
        line: "skills".into(),
    });
    let FrameBody::Content(lines) = host.render_frame(&terminal()).unwrap().body else {
        panic!("terminal should render content");
    };
    assert!(lines.contains(&"Technical Skills:".to_string()));
}

#[test]
fn terminal_content_receives_submitted_lines() {
    let mut host = test_host();
    host.handle_event(HostEvent::Open { id: terminal() });
    host.handle_event(HostEvent::Submit {
        id: terminal(),
        line: "contact".into(),
    });

    let frame = host.render_frame(&terminal()).unwrap();
    let FrameBody::Content(lines) = frame.body else {
        panic!("terminal should render content");
    };
    assert!(lines.contains(&"Contact Information:".to_string()));
}

#[test]
fn render_damaged_reports_only_changed_frames() {
    let mut host = test_host();
    open_at(&mut host, &terminal(), Geometry::new(100, 100, 400, 300));
    open_at(&mut host, &photos(), Geometry::new(700, 100, 400, 300));
    host.render();
    assert!(host.damaged().is_empty());

    down(&mut host, 120.0, 110.0);
    motion(&mut host, 130.0, 110.0);
    let updates = host.render_damaged();
    assert_eq!(updates.len(), 1);
    assert!(matches!(&updates[0], FrameUpdate::Mounted(view) if view.id == terminal() && view.interacting));

    up(&mut host, 130.0, 110.0);
    host.handle_event(HostEvent::Minimize { id: photos() });
    let updates = host.render_damaged();
    assert_eq!(updates.len(), 2);
    assert!(updates.contains(&FrameUpdate::Unmounted { id: photos() }));
}

#[test]
fn invariants_hold_after_mixed_operations() {
    let mut host = test_host();

    host.handle_event(HostEvent::Open { id: terminal() });
    host.handle_event(HostEvent::Open { id: photos() });
    down(&mut host, 200.0, 115.0);
    motion(&mut host, 260.0, 180.0);
    host.handle_event(HostEvent::ToggleMaximize { id: photos() });
    host.handle_event(HostEvent::PointerLeave);
    host.handle_event(HostEvent::TaskbarToggle { id: terminal() });
    host.handle_event(HostEvent::TaskbarToggle { id: terminal() });
    down(&mut host, 799.0, 599.0);
    motion(&mut host, 10.0, 10.0);
    up(&mut host, 10.0, 10.0);
    host.handle_event(HostEvent::Close { id: photos() });

    host.state.validate_invariants().expect("Invariants should hold");
    assert_eq!(host.active_listeners(), 0);
}
